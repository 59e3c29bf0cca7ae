//! Session events. Everything observable that a command caused.
//!
//! Events are returned to the host for display and logging.
//! They are never fed back into the session.

use crate::{
    model::{FertilizerLevel, PestManagement, RiverHealth},
    session::SessionStatus,
    types::Cycle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Decision events ────────────────────────────
    FertilizerChanged {
        cycle: Cycle,
        level: FertilizerLevel,
    },
    PestManagementChanged {
        cycle: Cycle,
        mode: PestManagement,
    },
    BufferChanged {
        cycle: Cycle,
        present: bool,
    },

    // ── Cycle events ───────────────────────────────
    CycleEvaluated {
        cycle: Cycle,
        crop_yield: f64,
        pollution_index: f64,
        river_health: RiverHealth,
        cumulative_yield: f64,
    },
    AdvanceIgnored {
        cycle: Cycle,
        status: SessionStatus,
    },

    // ── End conditions ─────────────────────────────
    RiverCollapsed {
        cycle: Cycle,
        river_health: RiverHealth,
    },
    TargetAchieved {
        cycle: Cycle,
        cumulative_yield: f64,
        river_health: RiverHealth,
    },

    // ── Session control ────────────────────────────
    SessionReset {
        previous_status: SessionStatus,
        previous_cycle: Cycle,
    },
}

impl SimEvent {
    /// Stable string name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::FertilizerChanged { .. }     => "fertilizer_changed",
            Self::PestManagementChanged { .. } => "pest_management_changed",
            Self::BufferChanged { .. }         => "buffer_changed",
            Self::CycleEvaluated { .. }        => "cycle_evaluated",
            Self::AdvanceIgnored { .. }        => "advance_ignored",
            Self::RiverCollapsed { .. }        => "river_collapsed",
            Self::TargetAchieved { .. }        => "target_achieved",
            Self::SessionReset { .. }          => "session_reset",
        }
    }
}
