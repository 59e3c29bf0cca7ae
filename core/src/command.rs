use crate::model::{FertilizerLevel, PestManagement};
use serde::{Deserialize, Serialize};

/// All player-issued commands. This is the entire mutation surface of a
/// session; hosts translate their own input events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Decisions (take effect on the next advance) ──
    SetFertilizer { level: FertilizerLevel },
    SetPestManagement { mode: PestManagement },
    SetBuffer { present: bool },

    // ── Session control ──────────────────────────────
    AdvanceCycle,
    Reset,
}

impl PlayerCommand {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFertilizer { .. }     => "set_fertilizer",
            Self::SetPestManagement { .. } => "set_pest_management",
            Self::SetBuffer { .. }         => "set_buffer",
            Self::AdvanceCycle             => "advance_cycle",
            Self::Reset                    => "reset",
        }
    }
}
