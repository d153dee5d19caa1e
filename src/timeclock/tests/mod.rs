//! Unit tests for the timeclock module.


pub(crate) mod support;
