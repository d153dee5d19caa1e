//! Adapter implementations of the timeclock ports.

pub mod memory;
pub mod postgres;
