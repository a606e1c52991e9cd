// src/error.rs
use crate::checkup::Cause;
use serde::Serialize;
use std::fmt;

/// Why a single dependency was reported unhealthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    HttpCallFailed,
    UnexpectedStatusCode,
    DatabaseUnreachable,
    StoreUnreachable,
    RpcUnreachable,
    DeadlineExceeded,
    TaskFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::HttpCallFailed => "http call failed",
            ErrorKind::UnexpectedStatusCode => "unexpected status code",
            ErrorKind::DatabaseUnreachable => "database unreachable",
            ErrorKind::StoreUnreachable => "store unreachable",
            ErrorKind::RpcUnreachable => "rpc unreachable",
            ErrorKind::DeadlineExceeded => "deadline exceeded",
            ErrorKind::TaskFailed => "check task failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP call failed: {0}")]
    HttpCall(String),

    #[error("unexpected status code: expected {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },

    #[error("database unreachable: {0}")]
    Database(String),

    #[error("store unreachable: {0}")]
    Store(String),

    #[error("RPC unreachable: {0}")]
    Rpc(String),

    #[error("checkup deadline exceeded")]
    DeadlineExceeded,
}

/// Render an error with its whole `source()` chain, e.g.
/// "transport error: tcp connect error: Connection refused (os error 111)".
pub(crate) fn chain<E>(err: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(err))
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::HttpCall(_) => ErrorKind::HttpCallFailed,
            ProbeError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatusCode,
            ProbeError::Database(_) => ErrorKind::DatabaseUnreachable,
            ProbeError::Store(_) => ErrorKind::StoreUnreachable,
            ProbeError::Rpc(_) => ErrorKind::RpcUnreachable,
            ProbeError::DeadlineExceeded => ErrorKind::DeadlineExceeded,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckupError {
    #[error("failed to load dependencies from {path}: {reason}")]
    ConfigLoadFailed { path: String, reason: String },

    #[error("some dependencies are down ({} failing)", .causes.len())]
    CheckupFailed { causes: Vec<Cause> },
}

impl CheckupError {
    /// Underlying causes of a failed checkup; empty for config errors.
    pub fn causes(&self) -> &[Cause] {
        match self {
            CheckupError::CheckupFailed { causes } => causes,
            CheckupError::ConfigLoadFailed { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_maps_to_kind() {
        let err = ProbeError::UnexpectedStatus {
            expected: 200,
            actual: 500,
        };
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatusCode);
        assert_eq!(
            err.to_string(),
            "unexpected status code: expected 200, got 500"
        );
        assert_eq!(ProbeError::Store("refused".into()).kind(), ErrorKind::StoreUnreachable);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("transport error")]
    struct Transport(#[source] std::io::Error);

    #[test]
    fn test_chain_keeps_underlying_cause() {
        let err = Transport(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));

        assert_eq!(chain(err), "transport error: connection refused");
    }
}
