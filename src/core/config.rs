//! Rules configuration.
//!
//! Every timing constant and table dimension the engine relies on lives
//! in [`RulesConfig`]. Defaults match a standard eight-ball table with a
//! 30 second shot clock. Configs are plain serde structs so hosts can ship
//! them as JSON:
//!
//! ```
//! use pool_rules::core::RulesConfig;
//!
//! let config = RulesConfig::from_json(r#"{ "shot_clock": 45.0 }"#).unwrap();
//! assert_eq!(config.shot_clock, 45.0);
//! assert_eq!(config.balls_per_group, 7);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Table dimensions in table-top units (origin at the outer top-left
/// corner of the rails, +x along the long side).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Outer length of the table including rails.
    pub width: f32,
    /// Outer width of the table including rails.
    pub height: f32,
    /// Cushion depth. The playing surface is inset by this on every side.
    pub cushion: f32,
    pub ball_radius: f32,
    /// Capture radius around each pocket centre.
    pub pocket_radius: f32,
    /// Corner pocket centres sit this far in from the outer corner.
    pub corner_pocket_inset: f32,
    /// Side pocket centres sit this far in from the long rails.
    pub side_pocket_inset: f32,
    /// Where the cue ball is spotted at rack time and after a scratch.
    pub cue_spot: Vec2,
    /// Rack apex.
    pub foot_spot: Vec2,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            cushion: 35.0,
            ball_radius: 12.0,
            pocket_radius: 22.0,
            corner_pocket_inset: 24.5,
            side_pocket_inset: 17.5,
            cue_spot: Vec2::new(250.0, 250.0),
            foot_spot: Vec2::new(700.0, 250.0),
        }
    }
}

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Seconds a player has to strike before aiming is forfeited.
    pub shot_clock: f32,

    /// Delay between a round finishing and the results round loading.
    pub results_delay: f32,

    /// How long the results round is shown before the next play round.
    pub stats_duration: f32,

    /// Seconds a ball spends animating into a pocket.
    pub pot_animation_duration: f32,

    /// Linear and angular speed below which a ball counts as stationary.
    pub settle_epsilon: f32,

    /// Seconds after the strike before pot prediction starts.
    pub predict_after: f32,

    /// Seconds after the strike before idle time is accelerated.
    pub accelerate_after: f32,

    /// Time scale requested once acceleration kicks in.
    pub fast_time_scale: f32,

    /// Seconds of straight-line travel swept when predicting a pot.
    pub sweep_lookahead: f32,

    /// Extra slack added to the pocket radius when predicting.
    pub prediction_tolerance: f32,

    /// Balls in each of the two groups.
    pub balls_per_group: u8,

    /// Elo K factor for rating updates.
    pub elo_k_factor: f32,

    /// Seed for seat selection and the break.
    pub seed: u64,

    pub table: TableConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            shot_clock: 30.0,
            results_delay: 3.0,
            stats_duration: 10.0,
            pot_animation_duration: 0.5,
            settle_epsilon: 0.1,
            predict_after: 2.0,
            accelerate_after: 3.0,
            fast_time_scale: 3.0,
            sweep_lookahead: 1.0,
            prediction_tolerance: 4.0,
            balls_per_group: 7,
            elo_k_factor: 32.0,
            seed: 42,
            table: TableConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("shot_clock", self.shot_clock),
            ("pot_animation_duration", self.pot_animation_duration),
            ("settle_epsilon", self.settle_epsilon),
            ("fast_time_scale", self.fast_time_scale),
            ("table.ball_radius", self.table.ball_radius),
            ("table.pocket_radius", self.table.pocket_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.accelerate_after < self.predict_after {
            return Err(EngineError::InvalidConfig(
                "accelerate_after must not be earlier than predict_after".to_string(),
            ));
        }
        if self.balls_per_group == 0 || self.balls_per_group > 7 {
            return Err(EngineError::InvalidConfig(format!(
                "balls_per_group must be 1..=7, got {}",
                self.balls_per_group
            )));
        }
        let t = &self.table;
        if t.width <= 2.0 * t.cushion || t.height <= 2.0 * t.cushion {
            return Err(EngineError::InvalidConfig(
                "table is smaller than its cushions".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_shot_clock(mut self, seconds: f32) -> Self {
        self.shot_clock = seconds;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_results_delay(mut self, seconds: f32) -> Self {
        self.results_delay = seconds;
        self
    }

    #[must_use]
    pub fn with_pot_animation_duration(mut self, seconds: f32) -> Self {
        self.pot_animation_duration = seconds;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: TableConfig) -> Self {
        self.table = table;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RulesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shot_clock, 30.0);
        assert_eq!(config.predict_after, 2.0);
        assert_eq!(config.accelerate_after, 3.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RulesConfig::default()
            .with_seed(123)
            .with_shot_clock(20.0)
            .with_results_delay(1.0);

        assert_eq!(config.seed, 123);
        assert_eq!(config.shot_clock, 20.0);
        assert_eq!(config.results_delay, 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RulesConfig::from_json(r#"{ "seed": 9, "table": { "ball_radius": 10.0 } }"#)
            .unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.table.ball_radius, 10.0);
        assert_eq!(config.table.pocket_radius, 22.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = RulesConfig::from_json(r#"{ "shot_clock": 0.0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let config = RulesConfig {
            predict_after: 5.0,
            accelerate_after: 1.0,
            ..RulesConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(RulesConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_serialization() {
        let config = RulesConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
