// src/checkup/runner.rs
use super::outcome::{CategoryReport, Cause, CheckOutcome};
use crate::error::ProbeError;
use crate::probe::{Descriptor, Kind, Prober};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// What a category does after its first failing descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure; later descriptors are not probed.
    #[default]
    FailFast,
    /// Probe every descriptor and report every failure.
    CheckAll,
}

/// Sequential executor for the descriptors of one category.
#[derive(Clone)]
pub struct CategoryRunner {
    category: Kind,
    prober: Arc<dyn Prober>,
    policy: FailurePolicy,
    verbose: bool,
    cancel: CancellationToken,
}

impl CategoryRunner {
    pub fn new(
        category: Kind,
        prober: Arc<dyn Prober>,
        policy: FailurePolicy,
        verbose: bool,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            category,
            prober,
            policy,
            verbose,
            cancel,
        }
    }

    pub async fn run(&self, descriptors: &[Descriptor]) -> CategoryReport {
        let mut causes = Vec::new();
        let mut probed = 0;

        for descriptor in descriptors {
            probed += 1;
            let target = descriptor.identity();

            match self.probe_once(descriptor).await {
                Ok(()) => info!("[{}] {} is healthy", self.category, target),
                Err(e) => {
                    if self.verbose {
                        warn!("[{}] {} is unhealthy: {}", self.category, target, e);
                    } else {
                        warn!("[{}] {} is unhealthy: {}", self.category, target, e.kind());
                    }

                    causes.push(Cause {
                        kind: e.kind(),
                        category: self.category,
                        target,
                        detail: e.to_string(),
                    });

                    if self.policy == FailurePolicy::FailFast {
                        break;
                    }
                }
            }
        }

        let outcome = if causes.is_empty() {
            CheckOutcome::Healthy
        } else {
            CheckOutcome::Unhealthy(causes)
        };

        CategoryReport {
            category: self.category,
            probed,
            outcome,
        }
    }

    async fn probe_once(&self, descriptor: &Descriptor) -> Result<(), ProbeError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ProbeError::DeadlineExceeded),
            result = self.prober.probe(descriptor) => result,
        }
    }
}
