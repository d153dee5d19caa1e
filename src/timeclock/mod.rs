//! Task timer state machine and time-accrual engine.
//!
//! The timeclock module owns the legal lifecycle of a tracked task
//! (pending, active, paused, break, completed), converts wall-clock time
//! into a durable `active_seconds` accumulator, and cascades a worker's
//! break status across every task they are running. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
