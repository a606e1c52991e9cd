// src/lib.rs
pub mod checkup;
pub mod config;
pub mod error;
pub mod probe;

pub use checkup::{Checkup, CheckupResult, HealthStatus};
pub use config::DependencySet;
pub use error::{CheckupError, ErrorKind};
