//! Taylor: manufacturing-floor labour tracking engine.
//!
//! This crate provides the core time-tracking engine behind a shop-floor
//! labour portal: workers are assigned operations on production orders,
//! start and stop timers against those assignments, and the accumulated
//! time is converted into labour cost for reporting.
//!
//! # Architecture
//!
//! Taylor follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`timeclock`]: Task timer state machine, accrual engine, and break
//!   cascade
//! - [`reporting`]: Labour cost aggregation over persisted task records

pub mod reporting;
pub mod timeclock;
