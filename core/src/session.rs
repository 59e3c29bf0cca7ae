//! The session controller. Owns the running simulation state.
//!
//! ADVANCE ORDER (fixed, never reordered):
//!   1. Increment the cycle counter.
//!   2. Evaluate the cycle model with the current decisions and river health.
//!   3. Add the yield to the cumulative total.
//!   4. Replace river health and the last result.
//!   5. Check end conditions: collapse first, then achievement.
//!
//! RULES:
//!   - Collapsed and Achieved are terminal. Only reset() leaves them.
//!   - Decision setters never evaluate anything; they apply on the next advance.
//!   - The controller performs no I/O. Hosts serialize access to it.

use crate::{
    command::PlayerCommand,
    config::SessionConfig,
    error::SimResult,
    event::SimEvent,
    model::{self, CycleOutcome, Decisions, FertilizerLevel, PestManagement, RiverHealth},
    types::Cycle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Collapsed,
    Achieved,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Everything a host needs to render the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub decisions:        Decisions,
    pub river_health:     RiverHealth,
    pub cycle_count:      Cycle,
    pub cumulative_yield: f64,
    pub last_result:      CycleOutcome,
    pub status:           SessionStatus,
}

pub struct SessionController {
    config:         SessionConfig,
    initial_health: RiverHealth,
    state:          SessionState,
}

impl SessionController {
    /// A session with the default thresholds, already seeded.
    pub fn new() -> Self {
        let config = SessionConfig::default();
        let initial_health = RiverHealth::PRISTINE;
        let state = seeded_state(config.initial_decisions, initial_health);
        Self { config, initial_health, state }
    }

    /// A session with custom thresholds. Fails if the config does not validate.
    pub fn with_config(config: SessionConfig) -> SimResult<Self> {
        config.validate()?;
        let initial_health = RiverHealth::new(config.initial_river_health)?;
        let state = seeded_state(config.initial_decisions, initial_health);
        Ok(Self { config, initial_health, state })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_fertilizer(&mut self, level: FertilizerLevel) {
        self.state.decisions.fertilizer_level = level;
    }

    pub fn set_pest_management(&mut self, mode: PestManagement) {
        self.state.decisions.pest_management = mode;
    }

    pub fn set_buffer(&mut self, present: bool) {
        self.state.decisions.buffer_present = present;
    }

    /// Run one cycle. A no-op once the session is no longer Active.
    pub fn advance_cycle(&mut self) -> &SessionState {
        self.advance();
        &self.state
    }

    /// Restore the initial state and re-seed it. Always succeeds.
    pub fn reset(&mut self) -> &SessionState {
        self.restart();
        &self.state
    }

    /// Dispatch one command and return the events it produced.
    pub fn apply(&mut self, command: &PlayerCommand) -> Vec<SimEvent> {
        let cycle = self.state.cycle_count;
        let before = self.state.decisions;

        match *command {
            PlayerCommand::SetFertilizer { level } => {
                self.set_fertilizer(level);
                if before.fertilizer_level != level {
                    return vec![SimEvent::FertilizerChanged { cycle, level }];
                }
                vec![]
            }
            PlayerCommand::SetPestManagement { mode } => {
                self.set_pest_management(mode);
                if before.pest_management != mode {
                    return vec![SimEvent::PestManagementChanged { cycle, mode }];
                }
                vec![]
            }
            PlayerCommand::SetBuffer { present } => {
                self.set_buffer(present);
                if before.buffer_present != present {
                    return vec![SimEvent::BufferChanged { cycle, present }];
                }
                vec![]
            }
            PlayerCommand::AdvanceCycle => self.advance(),
            PlayerCommand::Reset => self.restart(),
        }
    }

    fn advance(&mut self) -> Vec<SimEvent> {
        let state = &mut self.state;

        if state.status.is_terminal() {
            log::warn!(
                "advance ignored at cycle {}: session is {:?}",
                state.cycle_count,
                state.status
            );
            return vec![SimEvent::AdvanceIgnored {
                cycle:  state.cycle_count,
                status: state.status,
            }];
        }

        state.cycle_count += 1;
        let outcome = model::evaluate_health(&state.decisions, state.river_health);
        state.cumulative_yield += outcome.crop_yield;
        state.river_health = outcome.river_health;
        state.last_result = outcome;

        let cycle = state.cycle_count;
        log::debug!(
            "cycle={cycle} decisions={}/{}/buffer={} yield={} pollution={:.1} health={} \
             total={:.0}",
            state.decisions.fertilizer_level,
            state.decisions.pest_management,
            state.decisions.buffer_present,
            outcome.crop_yield,
            outcome.pollution_index,
            outcome.river_health,
            state.cumulative_yield,
        );

        let mut events = vec![SimEvent::CycleEvaluated {
            cycle,
            crop_yield:       outcome.crop_yield,
            pollution_index:  outcome.pollution_index,
            river_health:     outcome.river_health,
            cumulative_yield: state.cumulative_yield,
        }];

        // Collapse is checked first: a cycle meeting both conditions is a loss.
        let health = state.river_health.value();
        if health <= self.config.collapse_threshold {
            state.status = SessionStatus::Collapsed;
            log::info!("cycle={cycle} river collapsed at health {}", state.river_health);
            events.push(SimEvent::RiverCollapsed {
                cycle,
                river_health: state.river_health,
            });
        } else if state.cumulative_yield >= self.config.yield_target
            && health > self.config.min_health_for_achievement
        {
            state.status = SessionStatus::Achieved;
            log::info!(
                "cycle={cycle} target achieved: yield {:.0} with river health {}",
                state.cumulative_yield,
                state.river_health
            );
            events.push(SimEvent::TargetAchieved {
                cycle,
                cumulative_yield: state.cumulative_yield,
                river_health:     state.river_health,
            });
        }

        events
    }

    fn restart(&mut self) -> Vec<SimEvent> {
        let previous_status = self.state.status;
        let previous_cycle = self.state.cycle_count;

        self.state = seeded_state(self.config.initial_decisions, self.initial_health);
        log::info!("session reset (was {previous_status:?} at cycle {previous_cycle})");

        vec![
            SimEvent::SessionReset { previous_status, previous_cycle },
            SimEvent::CycleEvaluated {
                cycle:            self.state.cycle_count,
                crop_yield:       self.state.last_result.crop_yield,
                pollution_index:  self.state.last_result.pollution_index,
                river_health:     self.state.river_health,
                cumulative_yield: self.state.cumulative_yield,
            },
        ]
    }
}

impl Default for SessionController {
    fn default() -> Self { Self::new() }
}

/// Initial state with the seeding evaluation already applied.
fn seeded_state(decisions: Decisions, initial_health: RiverHealth) -> SessionState {
    let outcome = model::evaluate_health(&decisions, initial_health);
    SessionState {
        decisions,
        river_health:     outcome.river_health,
        cycle_count:      1,
        cumulative_yield: outcome.crop_yield,
        last_result:      outcome,
        status:           SessionStatus::Active,
    }
}
