//! Shared primitive types used across the simulation.

/// A simulation cycle. One cycle = one round of decisions and outcome.
pub type Cycle = u64;
