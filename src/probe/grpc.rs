// src/probe/grpc.rs
use crate::config::RpcDescriptor;
use crate::error::{chain, ProbeError};
use std::time::Duration;
use tokio::time::timeout;
use tonic::transport::Endpoint;

/// Dial the target and drop the channel once it is established.
pub async fn probe(g: &RpcDescriptor, default_timeout: Duration) -> Result<(), ProbeError> {
    let limit = g.timeout_or(default_timeout);

    let endpoint = Endpoint::from_shared(grpc_target(&g.host))
        .map_err(|e| ProbeError::Rpc(chain(e)))?
        .connect_timeout(limit);

    let channel = timeout(limit, endpoint.connect())
        .await
        .map_err(|_| ProbeError::Rpc(format!("dial timed out after {:?}", limit)))?
        .map_err(|e| ProbeError::Rpc(chain(e)))?;

    drop(channel);
    Ok(())
}

fn grpc_target(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bare_host_gets_scheme() {
        assert_eq!(grpc_target("localhost:50051"), "http://localhost:50051");
        assert_eq!(grpc_target("https://api:443"), "https://api:443");
    }

    #[tokio::test]
    async fn test_closed_port_is_rpc_unreachable() {
        let g = RpcDescriptor {
            host: "127.0.0.1:9".into(),
            timeout: 200,
        };

        let err = probe(&g, Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RpcUnreachable);
        // The dial failure reason sits below tonic's "transport error".
        assert!(err
            .to_string()
            .starts_with("RPC unreachable: transport error: "));
    }
}
