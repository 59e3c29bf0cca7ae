//! The cycle model: one round of farm decisions in, one outcome out.
//!
//! RULE: This module holds no state. `evaluate` is a pure function of its
//! arguments; identical inputs always produce identical outputs.
//!
//! Per cycle:
//!   1. Yield and base nutrient load come from the fertilizer level.
//!   2. A vegetative buffer keeps only 40% of the nutrient load.
//!   3. Pest management sets the toxic load.
//!   4. Pollution index = nutrient + toxic, capped at 100.
//!   5. River health drops by the load impact and recovers +3, clamped to [0, 100].

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of nutrient load that still reaches the river behind a buffer.
pub const BUFFER_RETENTION: f64 = 0.4;

/// Natural recovery applied to river health every cycle, unconditionally.
pub const NATURAL_RECOVERY: f64 = 3.0;

pub const POLLUTION_CEILING: f64 = 100.0;

pub const HEALTH_MIN: f64 = 0.0;
pub const HEALTH_MAX: f64 = 100.0;

// ── Decision inputs ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerLevel {
    Low,
    Medium,
    High,
}

impl FertilizerLevel {
    pub const ALL: [FertilizerLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn crop_yield(&self) -> f64 {
        match self {
            Self::Low    => 40.0,
            Self::Medium => 70.0,
            Self::High   => 85.0,
        }
    }

    /// Nutrient load lost to the water before any buffer.
    pub fn base_nutrient_load(&self) -> f64 {
        match self {
            Self::Low    => 10.0,
            Self::Medium => 25.0,
            Self::High   => 45.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low    => "low",
            Self::Medium => "medium",
            Self::High   => "high",
        }
    }
}

impl TryFrom<u8> for FertilizerLevel {
    type Error = SimError;

    fn try_from(index: u8) -> SimResult<Self> {
        match index {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(SimError::invalid("fertilizer_level", other)),
        }
    }
}

impl FromStr for FertilizerLevel {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low"    => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high"   => Ok(Self::High),
            _ => Err(SimError::invalid("fertilizer_level", s)),
        }
    }
}

impl fmt::Display for FertilizerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PestManagement {
    /// Integrated, low-chemical management.
    Integrated,
    /// Intensive chemical spraying.
    Intensive,
}

impl PestManagement {
    pub const ALL: [PestManagement; 2] = [Self::Integrated, Self::Intensive];

    pub fn toxic_load(&self) -> f64 {
        match self {
            Self::Integrated => 5.0,
            Self::Intensive  => 25.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Integrated => "integrated",
            Self::Intensive  => "intensive",
        }
    }
}

impl TryFrom<u8> for PestManagement {
    type Error = SimError;

    fn try_from(index: u8) -> SimResult<Self> {
        match index {
            0 => Ok(Self::Integrated),
            1 => Ok(Self::Intensive),
            other => Err(SimError::invalid("pest_management", other)),
        }
    }
}

impl FromStr for PestManagement {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integrated" => Ok(Self::Integrated),
            "intensive"  => Ok(Self::Intensive),
            _ => Err(SimError::invalid("pest_management", s)),
        }
    }
}

impl fmt::Display for PestManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three inputs the player tunes each cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decisions {
    pub fertilizer_level: FertilizerLevel,
    pub pest_management:  PestManagement,
    pub buffer_present:   bool,
}

impl Default for Decisions {
    fn default() -> Self {
        Self {
            fertilizer_level: FertilizerLevel::Medium,
            pest_management:  PestManagement::Integrated,
            buffer_present:   true,
        }
    }
}

// ── River health ──────────────────────────────────────────────────

/// River health score, always within [0, 100].
///
/// Construction from a raw float is checked. Deserialization goes through
/// the same check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiverHealth(f64);

impl RiverHealth {
    pub const PRISTINE: RiverHealth = RiverHealth(HEALTH_MAX);

    pub fn new(value: f64) -> SimResult<Self> {
        if value.is_finite() && (HEALTH_MIN..=HEALTH_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SimError::invalid("river_health", value))
        }
    }

    fn clamped(value: f64) -> Self {
        Self(value.clamp(HEALTH_MIN, HEALTH_MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiverHealth {
    type Error = SimError;

    fn try_from(value: f64) -> SimResult<Self> {
        Self::new(value)
    }
}

impl From<RiverHealth> for f64 {
    fn from(health: RiverHealth) -> f64 {
        health.0
    }
}

impl fmt::Display for RiverHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

// ── Evaluation ────────────────────────────────────────────────────

/// Result of one model evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CycleOutcome {
    #[serde(rename = "yield")]
    pub crop_yield:              f64,
    pub pollution_index:         f64,
    pub river_health:            RiverHealth,
    pub effective_nutrient_load: f64,
    pub toxic_load:              f64,
    pub health_impact:           f64,
}

/// Evaluate one cycle from raw prior health.
///
/// Fails with `InvalidInput` if `prior_health` is not a finite value in [0, 100].
/// Out-of-range prior health is rejected here, not clamped; only the new health is clamped.
pub fn evaluate(
    fertilizer_level: FertilizerLevel,
    pest_management:  PestManagement,
    buffer_present:   bool,
    prior_health:     f64,
) -> SimResult<CycleOutcome> {
    let prior = RiverHealth::new(prior_health)?;
    let decisions = Decisions { fertilizer_level, pest_management, buffer_present };
    Ok(evaluate_health(&decisions, prior))
}

/// Evaluate one cycle from already-validated inputs.
pub fn evaluate_health(decisions: &Decisions, prior: RiverHealth) -> CycleOutcome {
    let level = decisions.fertilizer_level;

    let effective_nutrient_load = if decisions.buffer_present {
        level.base_nutrient_load() * BUFFER_RETENTION
    } else {
        level.base_nutrient_load()
    };
    let toxic_load = decisions.pest_management.toxic_load();

    // Loads are non-negative, so only the ceiling needs enforcing.
    let pollution_index = (effective_nutrient_load + toxic_load).min(POLLUTION_CEILING);

    let health_impact = effective_nutrient_load / 10.0 + toxic_load / 5.0;
    let river_health =
        RiverHealth::clamped(prior.value() - health_impact + NATURAL_RECOVERY);

    CycleOutcome {
        crop_yield: level.crop_yield(),
        pollution_index,
        river_health,
        effective_nutrient_load,
        toxic_load,
        health_impact,
    }
}
