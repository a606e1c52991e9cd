// src/checkup/outcome.rs
use crate::error::{CheckupError, ErrorKind};
use crate::probe::Kind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Why one dependency failed: the error kind plus the dependency it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub kind: ErrorKind,
    pub category: Kind,
    pub target: String,
    pub detail: String,
}

impl Cause {
    /// One-line description; the underlying error text only when verbose.
    pub fn summary(&self, verbose: bool) -> String {
        if verbose {
            format!(
                "[{}] {}: {} ({})",
                self.category, self.target, self.kind, self.detail
            )
        } else {
            format!("[{}] {}: {}", self.category, self.target, self.kind)
        }
    }
}

/// Result of one category runner. `Unhealthy` is never empty, and holds
/// exactly one cause under fail-fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "causes", rename_all = "lowercase")]
pub enum CheckOutcome {
    Healthy,
    Unhealthy(Vec<Cause>),
}

impl CheckOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, CheckOutcome::Healthy)
    }

    pub fn causes(&self) -> &[Cause] {
        match self {
            CheckOutcome::Healthy => &[],
            CheckOutcome::Unhealthy(causes) => causes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: Kind,
    /// Descriptors actually probed; fewer than configured when a failure
    /// short-circuited the rest.
    pub probed: usize,
    pub outcome: CheckOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckupResult {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub overall: HealthStatus,
    pub causes: Vec<Cause>,
    pub categories: Vec<CategoryReport>,
}

impl CheckupResult {
    pub fn is_healthy(&self) -> bool {
        self.overall == HealthStatus::Healthy
    }

    /// Collapse into the aggregate signal, keeping every underlying cause.
    pub fn into_result(self) -> Result<CheckupResult, CheckupError> {
        if self.is_healthy() {
            Ok(self)
        } else {
            Err(CheckupError::CheckupFailed {
                causes: self.causes,
            })
        }
    }
}
