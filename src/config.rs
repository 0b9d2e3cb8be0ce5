//! Rally Constant Table
//!
//! Every tunable of the rally lives in one [`GameConfig`]. Tables loaded from
//! JSON must name every constant: timing-dependent gameplay silently breaks
//! when a value falls back to something unintended, so a missing or
//! out-of-range constant is a [`ConfigError`] at load time.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

use crate::core::court::ZoneLayout;
use crate::game::shot::{ShotKind, ShotThresholds};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Table file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Table is not valid JSON or is missing a required constant.
    #[error("Malformed config table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A constant is present but unusable.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending constant
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// One value per shot kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotTable<T> {
    /// Value for [`ShotKind::Normal`]
    pub normal: T,
    /// Value for [`ShotKind::Smash`]
    pub smash: T,
    /// Value for [`ShotKind::Clear`]
    pub clear: T,
    /// Value for [`ShotKind::Drop`]
    pub drop: T,
}

impl<T: Copy> ShotTable<T> {
    /// Value for a shot kind.
    #[inline]
    pub fn get(&self, kind: ShotKind) -> T {
        match kind {
            ShotKind::Normal => self.normal,
            ShotKind::Smash => self.smash,
            ShotKind::Clear => self.clear,
            ShotKind::Drop => self.drop,
        }
    }

    fn entries(&self) -> [(ShotKind, T); 4] {
        [
            (ShotKind::Normal, self.normal),
            (ShotKind::Smash, self.smash),
            (ShotKind::Clear, self.clear),
            (ShotKind::Drop, self.drop),
        ]
    }
}

/// Tunable constants for a rally.
///
/// Times are in seconds, horizontal distances in court units, depths in
/// zone units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Court width; horizontal positions live in `[0, court_width]`
    pub court_width: f64,
    /// Player baseline depth
    pub player_base_depth: f64,
    /// Opponent baseline depth
    pub opponent_base_depth: f64,
    /// Baseline to net zone distance
    pub net_zone_offset: f64,
    /// Baseline to back zone distance
    pub back_zone_offset: f64,

    /// Flight duration of a Normal shot
    pub shuttle_time: f64,
    /// Opponent thinking time before the per-shot multiplier
    pub opponent_react_time: f64,
    /// Minimum time between two player strokes
    pub stroke_cooldown: f64,

    /// Per-frame hand delta that counts as a swing
    pub move_threshold: f64,
    /// Per-frame hand delta below which the hand is at rest
    pub neutral_threshold: f64,
    /// Gain applied to the hand's horizontal offset from screen center
    pub hand_sensitivity: f64,

    /// Fraction of the remaining horizontal gap closed per frame
    pub player_smoothing: f64,
    /// Largest horizontal gap considered per frame
    pub max_player_speed: f64,
    /// Fraction of the remaining depth gap closed per tick
    pub zone_smoothing: f64,

    /// Catch radius before shot and movement adjustments
    pub catch_radius: f64,
    /// Floor for the adjusted catch radius
    pub min_catch_radius: f64,
    /// Radius lost per unit of distance between player and their target
    pub catch_movement_penalty: f64,
    /// Depth distance within which an arriving shuttle can be caught
    pub catch_depth_tolerance: f64,

    /// Lower bound of random aim targets
    pub aim_min: f64,
    /// Upper bound of random aim targets
    pub aim_max: f64,
    /// How far a drop's aim is pulled toward the short side (0..=1)
    pub drop_pull: f64,

    /// Vertical acceleration of the shuttle arc (negative)
    pub gravity: f64,

    /// Flight duration multiplier per shot
    pub shot_time_multipliers: ShotTable<f64>,
    /// Opponent reaction multiplier per incoming shot
    pub reaction_multipliers: ShotTable<f64>,
    /// Catch radius scale per incoming shot
    pub catch_radius_scales: ShotTable<f64>,
    /// Arc peak parameter per shot
    pub arc_heights: ShotTable<f64>,

    /// Stroke classification thresholds
    pub thresholds: ShotThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            court_width: 10.0,
            player_base_depth: 650.0,
            opponent_base_depth: 150.0,
            net_zone_offset: 80.0,
            back_zone_offset: 40.0,

            shuttle_time: 0.65,
            opponent_react_time: 0.4,
            stroke_cooldown: 0.8,

            move_threshold: 0.035,
            neutral_threshold: 0.012,
            hand_sensitivity: 1.8,

            player_smoothing: 0.35,
            max_player_speed: 0.9,
            zone_smoothing: 0.15,

            catch_radius: 0.8,
            min_catch_radius: 0.3,
            catch_movement_penalty: 0.4,
            catch_depth_tolerance: 35.0,

            aim_min: 1.5,
            aim_max: 8.5,
            drop_pull: 0.6,

            gravity: -9.8,

            shot_time_multipliers: ShotTable { normal: 1.0, smash: 0.45, clear: 1.6, drop: 0.9 },
            reaction_multipliers: ShotTable { normal: 0.9, smash: 1.4, clear: 0.9, drop: 0.6 },
            catch_radius_scales: ShotTable { normal: 1.0, smash: 0.65, clear: 1.0, drop: 1.25 },
            arc_heights: ShotTable { normal: 1.5, smash: 0.6, clear: 3.0, drop: 1.0 },

            thresholds: ShotThresholds::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON table.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON table from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Zone depths derived from the baselines and offsets.
    pub fn zone_layout(&self) -> ZoneLayout {
        ZoneLayout {
            player_base: self.player_base_depth,
            opponent_base: self.opponent_base_depth,
            net_offset: self.net_zone_offset,
            back_offset: self.back_zone_offset,
        }
    }

    /// Flight duration for a shot.
    #[inline]
    pub fn flight_duration(&self, kind: ShotKind) -> f64 {
        self.shuttle_time * self.shot_time_multipliers.get(kind)
    }

    /// Opponent reaction time for an incoming shot.
    #[inline]
    pub fn reaction_time(&self, incoming: ShotKind) -> f64 {
        self.opponent_react_time * self.reaction_multipliers.get(incoming)
    }

    /// Check every constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("court_width", self.court_width),
            ("player_base_depth", self.player_base_depth),
            ("opponent_base_depth", self.opponent_base_depth),
            ("net_zone_offset", self.net_zone_offset),
            ("back_zone_offset", self.back_zone_offset),
            ("shuttle_time", self.shuttle_time),
            ("opponent_react_time", self.opponent_react_time),
            ("stroke_cooldown", self.stroke_cooldown),
            ("move_threshold", self.move_threshold),
            ("neutral_threshold", self.neutral_threshold),
            ("hand_sensitivity", self.hand_sensitivity),
            ("player_smoothing", self.player_smoothing),
            ("max_player_speed", self.max_player_speed),
            ("zone_smoothing", self.zone_smoothing),
            ("catch_radius", self.catch_radius),
            ("min_catch_radius", self.min_catch_radius),
            ("catch_movement_penalty", self.catch_movement_penalty),
            ("catch_depth_tolerance", self.catch_depth_tolerance),
            ("aim_min", self.aim_min),
            ("aim_max", self.aim_max),
            ("drop_pull", self.drop_pull),
            ("gravity", self.gravity),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        let positive = [
            ("court_width", self.court_width),
            ("shuttle_time", self.shuttle_time),
            ("hand_sensitivity", self.hand_sensitivity),
            ("max_player_speed", self.max_player_speed),
            ("catch_radius", self.catch_radius),
            ("min_catch_radius", self.min_catch_radius),
            ("catch_depth_tolerance", self.catch_depth_tolerance),
            ("move_threshold", self.move_threshold),
            ("neutral_threshold", self.neutral_threshold),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("net_zone_offset", self.net_zone_offset),
            ("back_zone_offset", self.back_zone_offset),
            ("opponent_react_time", self.opponent_react_time),
            ("stroke_cooldown", self.stroke_cooldown),
            ("catch_movement_penalty", self.catch_movement_penalty),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        for (field, value) in [
            ("player_smoothing", self.player_smoothing),
            ("zone_smoothing", self.zone_smoothing),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(invalid(field, format!("must be in (0, 1], got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.drop_pull) {
            return Err(invalid("drop_pull", format!("must be in [0, 1], got {}", self.drop_pull)));
        }
        if self.player_base_depth <= self.opponent_base_depth {
            return Err(invalid(
                "player_base_depth",
                "player baseline must be deeper than the opponent's".to_string(),
            ));
        }
        if self.aim_min < 0.0 || self.aim_max > self.court_width || self.aim_min >= self.aim_max {
            return Err(invalid(
                "aim_min",
                format!(
                    "aim range [{}, {}] must be a non-empty range inside the court",
                    self.aim_min, self.aim_max
                ),
            ));
        }
        if self.gravity >= 0.0 {
            return Err(invalid("gravity", format!("must be negative, got {}", self.gravity)));
        }

        check_table("shot_time_multipliers", &self.shot_time_multipliers, |v| v > 0.0)?;
        check_table("reaction_multipliers", &self.reaction_multipliers, |v| v >= 0.0)?;
        check_table("catch_radius_scales", &self.catch_radius_scales, |v| v > 0.0)?;
        check_table("arc_heights", &self.arc_heights, |v| v >= 0.0)?;

        self.thresholds.validate()
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn check_table(
    field: &'static str,
    table: &ShotTable<f64>,
    accept: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    for (kind, value) in table.entries() {
        if !value.is_finite() || !accept(value) {
            return Err(invalid(field, format!("{value} is out of range for {kind:?}")));
        }
    }
    Ok(())
}
