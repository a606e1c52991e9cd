// src/checkup/mod.rs
mod orchestrator;
mod outcome;
mod runner;

pub use orchestrator::Checkup;
pub use outcome::{CategoryReport, Cause, CheckOutcome, CheckupResult, HealthStatus};
pub use runner::{CategoryRunner, FailurePolicy};
