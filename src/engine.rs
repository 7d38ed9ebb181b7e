//! Trace lifecycle management and host integration.

pub mod clock;
pub mod command;
pub mod config;
pub mod lifecycle;
pub mod schedule;
