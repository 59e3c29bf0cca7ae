//! Riverfarm simulation core.
//!
//! A deterministic farm/river model driven one cycle at a time. This crate
//! has no UI and no I/O; hosts translate their input into `PlayerCommand`s
//! and render `SessionState`.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod session;
pub mod types;

pub use command::PlayerCommand;
pub use config::SessionConfig;
pub use error::{SimError, SimResult};
pub use event::SimEvent;
pub use model::{
    evaluate, evaluate_health, CycleOutcome, Decisions, FertilizerLevel, PestManagement,
    RiverHealth,
};
pub use session::{SessionController, SessionState, SessionStatus};
pub use types::Cycle;
