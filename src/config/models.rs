// src/config/models.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 1000;

/// Every dependency to probe, grouped the way the dependency file groups them.
/// A missing group is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencySet {
    #[serde(default)]
    pub api: Vec<HttpDescriptor>,

    #[serde(default)]
    pub database: DatabaseDependencies,

    #[serde(default)]
    pub grpc: Vec<RpcDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDependencies {
    #[serde(default)]
    pub postgres: Vec<PostgresDescriptor>,

    #[serde(default)]
    pub redis: Vec<RedisDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpDescriptor {
    pub endpoint: String,

    #[serde(rename = "statuscode", alias = "status_code")]
    pub status_code: u16,

    /// Milliseconds; zero means the default.
    #[serde(default)]
    pub timeout: u64,
}

impl HttpDescriptor {
    pub fn timeout(&self) -> Duration {
        match self.timeout {
            0 => Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgresDescriptor {
    pub conn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisDescriptor {
    pub conn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcDescriptor {
    pub host: String,

    /// Milliseconds; zero falls back to the checkup's RPC default.
    #[serde(default)]
    pub timeout: u64,
}

impl RpcDescriptor {
    pub fn timeout_or(&self, default: Duration) -> Duration {
        match self.timeout {
            0 => default,
            ms => Duration::from_millis(ms),
        }
    }
}

impl DependencySet {
    pub fn is_empty(&self) -> bool {
        self.api.is_empty()
            && self.database.postgres.is_empty()
            && self.database.redis.is_empty()
            && self.grpc.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for api in &self.api {
            if api.endpoint.trim().is_empty() {
                bail!("api endpoint must not be empty");
            }
            Url::parse(&api.endpoint)
                .map_err(|e| anyhow::anyhow!("invalid api endpoint {}: {}", api.endpoint, e))?;
            if !(100..=599).contains(&api.status_code) {
                bail!(
                    "api {} expects invalid status code {}",
                    api.endpoint,
                    api.status_code
                );
            }
        }

        if self.database.postgres.iter().any(|p| p.conn.trim().is_empty()) {
            bail!("postgres conn must not be empty");
        }

        if self.database.redis.iter().any(|r| r.conn.trim().is_empty()) {
            bail!("redis conn must not be empty");
        }

        if self.grpc.iter().any(|g| g.host.trim().is_empty()) {
            bail!("grpc host must not be empty");
        }

        Ok(())
    }
}

/// Knobs for a single checkup pass, independent of what is being checked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckupSettings {
    pub verbose: bool,
    pub fail_fast: bool,
    /// Overall pass deadline in milliseconds; zero disables it.
    pub deadline_ms: u64,
    pub rpc_default_timeout_ms: u64,
}

impl Default for CheckupSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            fail_fast: true,
            deadline_ms: 0,
            rpc_default_timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
        }
    }
}

impl CheckupSettings {
    pub fn deadline(&self) -> Option<Duration> {
        (self.deadline_ms > 0).then(|| Duration::from_millis(self.deadline_ms))
    }

    pub fn rpc_default_timeout(&self) -> Duration {
        match self.rpc_default_timeout_ms {
            0 => Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }
}
