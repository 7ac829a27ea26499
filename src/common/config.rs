//! Tunable constants read by the per-frame pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

/// Physics tuning shared by every body and collider in a [`crate::PhysicsWorld`].
///
/// Missing fields in a JSON document fall back to [`PhysicsConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration before the per-body multiplier.
    pub gravity: f64,
    /// Multiplier given to newly created bodies.
    pub default_gravity_multiplier: f64,
    /// Per-axis speeds below which a velocity component snaps to zero.
    pub velocity_snap: Vec2,
    /// Default ground forgiveness for new colliders.
    pub ground_tolerance: f64,
    /// Extra gap left between two circles after their positional correction.
    pub circle_separation_margin: f64,
    /// Relative half of the SAT reference-face bias.
    pub sat_bias_relative: f64,
    /// Absolute half of the SAT reference-face bias.
    pub sat_bias_absolute: f64,
    /// Minimum |normal.y| for an oriented-box contact to count as support.
    pub vertical_normal_threshold: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            default_gravity_multiplier: 100.0,
            velocity_snap: Vec2::new(25.0, 0.5),
            ground_tolerance: 5.0,
            circle_separation_margin: 0.1,
            sat_bias_relative: 0.95,
            sat_bias_absolute: 0.01,
            vertical_normal_threshold: 0.5,
        }
    }
}

impl PhysicsConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(?config, "loaded physics config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects negative or non-finite values.
    pub fn validate(&self) -> Result<()> {
        non_negative("gravity", self.gravity)?;
        non_negative("default_gravity_multiplier", self.default_gravity_multiplier)?;
        non_negative("velocity_snap.x", self.velocity_snap.x)?;
        non_negative("velocity_snap.y", self.velocity_snap.y)?;
        non_negative("ground_tolerance", self.ground_tolerance)?;
        non_negative("circle_separation_margin", self.circle_separation_margin)?;
        non_negative("sat_bias_relative", self.sat_bias_relative)?;
        non_negative("sat_bias_absolute", self.sat_bias_absolute)?;
        if !(0.0..=1.0).contains(&self.vertical_normal_threshold) {
            return Err(PhysicsError::InvalidConfig {
                field: "vertical_normal_threshold",
                reason: format!("{} is outside [0, 1]", self.vertical_normal_threshold),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidConfig {
            field,
            reason: format!("{value} must be finite and non-negative"),
        })
    }
}
