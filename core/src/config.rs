use crate::model::{Decisions, HEALTH_MAX, HEALTH_MIN};
use serde::{Deserialize, Serialize};

/// End-condition thresholds and initial values for a session.
///
/// Model constants (yield tables, buffer retention, recovery) are fixed
/// in `model` and are not configurable here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_river_health:       f64,
    /// River health at or below this collapses the session.
    pub collapse_threshold:         f64,
    pub yield_target:               f64,
    /// River health must stay strictly above this for the target to count.
    pub min_health_for_achievement: f64,
    pub initial_decisions:          Decisions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_river_health:       100.0,
            collapse_threshold:         10.0,
            yield_target:               5000.0,
            min_health_for_achievement: 40.0,
            initial_decisions:          Decisions::default(),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// Values are checked when a session is built from the config.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid session config {path}: {e}"))?;
        log::debug!("Loaded session config from {path}: {config:?}");
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Called by `SessionController::with_config`.
    pub fn validate(&self) -> anyhow::Result<()> {
        let finite = [
            ("initial_river_health", self.initial_river_health),
            ("collapse_threshold", self.collapse_threshold),
            ("yield_target", self.yield_target),
            ("min_health_for_achievement", self.min_health_for_achievement),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                anyhow::bail!("{name} must be finite, got {value}");
            }
        }
        if !(HEALTH_MIN..=HEALTH_MAX).contains(&self.initial_river_health) {
            anyhow::bail!(
                "initial_river_health must be within [{HEALTH_MIN}, {HEALTH_MAX}], got {}",
                self.initial_river_health
            );
        }
        if self.yield_target < 0.0 {
            anyhow::bail!("yield_target must not be negative, got {}", self.yield_target);
        }
        if self.min_health_for_achievement < self.collapse_threshold {
            // Allowed, but collapse wins every simultaneous win/loss cycle.
            log::warn!(
                "min_health_for_achievement ({}) is below collapse_threshold ({})",
                self.min_health_for_achievement,
                self.collapse_threshold
            );
        }
        Ok(())
    }
}
