// src/checkup/orchestrator.rs
use super::outcome::{CategoryReport, Cause, CheckOutcome, CheckupResult, HealthStatus};
use super::runner::{CategoryRunner, FailurePolicy};
use crate::config::{CheckupSettings, DependencySet};
use crate::error::ErrorKind;
use crate::probe::{Kind, LiveProber, Prober};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs one checkup pass: a task per non-empty category, joined, then reduced
/// to a single verdict. Holds no state between passes.
#[derive(Clone)]
pub struct Checkup {
    prober: Arc<dyn Prober>,
    policy: FailurePolicy,
    verbose: bool,
    deadline: Option<Duration>,
}

impl Checkup {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            policy: FailurePolicy::FailFast,
            verbose: false,
            deadline: None,
        }
    }

    /// Live prober configured from `settings`.
    pub fn from_settings(settings: &CheckupSettings) -> Self {
        let prober = LiveProber::new().with_rpc_default_timeout(settings.rpc_default_timeout());
        let policy = if settings.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::CheckAll
        };

        Self::new(Arc::new(prober))
            .with_policy(policy)
            .with_verbose(settings.verbose)
            .with_deadline(settings.deadline())
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Include probe error detail in failure logs.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Bound the whole pass; probes still running at the deadline report
    /// `DeadlineExceeded`.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub async fn checkup(&self, deps: &DependencySet) -> CheckupResult {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        let span = info_span!("checkup", %id, prober = %self.prober.name());

        let cancel = CancellationToken::new();
        let timer = self.deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                cancel.cancel();
            })
        });

        let mut launched = Vec::new();
        let mut tasks = Vec::new();

        for kind in Kind::ALL {
            let descriptors = deps.descriptors(kind);
            if descriptors.is_empty() {
                continue;
            }

            let runner = CategoryRunner::new(
                kind,
                self.prober.clone(),
                self.policy,
                self.verbose,
                cancel.clone(),
            );
            let task = tokio::spawn(
                async move { runner.run(&descriptors).await }.instrument(span.clone()),
            );

            launched.push(kind);
            tasks.push(task);
        }

        // Each task hands back its own report; nothing is written concurrently.
        let results = futures::future::join_all(tasks).await;

        if let Some(timer) = timer {
            timer.abort();
        }

        let categories: Vec<CategoryReport> = launched
            .into_iter()
            .zip(results)
            .map(|(kind, result)| match result {
                Ok(report) => report,
                Err(e) => {
                    error!(parent: &span, "[{}] check task failed: {}", kind, e);
                    CategoryReport {
                        category: kind,
                        probed: 0,
                        outcome: CheckOutcome::Unhealthy(vec![Cause {
                            kind: ErrorKind::TaskFailed,
                            category: kind,
                            target: kind.to_string(),
                            detail: e.to_string(),
                        }]),
                    }
                }
            })
            .collect();

        let causes: Vec<Cause> = categories
            .iter()
            .flat_map(|report| report.outcome.causes().iter().cloned())
            .collect();

        let overall = if causes.is_empty() {
            info!(parent: &span, "All dependencies are healthy. Ready to go.");
            HealthStatus::Healthy
        } else {
            warn!(
                parent: &span,
                "Checkup failed: {} of {} categories unhealthy",
                categories.iter().filter(|r| !r.outcome.is_healthy()).count(),
                categories.len()
            );
            HealthStatus::Unhealthy
        };

        CheckupResult {
            id,
            started_at,
            elapsed_ms: start.elapsed().as_millis() as u64,
            overall,
            causes,
            categories,
        }
    }
}
