// src/probe/mod.rs
mod descriptor;
pub mod grpc;
pub mod http;
pub mod postgres;
pub mod redis;

pub use descriptor::{Descriptor, Kind};

use crate::config::DEFAULT_RPC_TIMEOUT_MS;
use crate::error::ProbeError;
use async_trait::async_trait;
use std::time::Duration;

/// Checks a single dependency. Implementations must not retry.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, descriptor: &Descriptor) -> Result<(), ProbeError>;

    fn name(&self) -> &'static str;
}

/// Probes real dependencies over the network.
#[derive(Debug, Clone)]
pub struct LiveProber {
    rpc_default_timeout: Duration,
}

impl LiveProber {
    pub fn new() -> Self {
        Self {
            rpc_default_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
        }
    }

    /// Dial bound for RPC descriptors that leave their timeout unset.
    pub fn with_rpc_default_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_default_timeout = timeout;
        self
    }
}

impl Default for LiveProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for LiveProber {
    async fn probe(&self, descriptor: &Descriptor) -> Result<(), ProbeError> {
        match descriptor {
            Descriptor::Http(api) => http::probe(api).await,
            Descriptor::RelationalDb(psql) => postgres::probe(psql).await,
            Descriptor::KvStore(red) => redis::probe(red).await,
            Descriptor::Rpc(g) => grpc::probe(g, self.rpc_default_timeout).await,
        }
    }

    fn name(&self) -> &'static str {
        "live"
    }
}
