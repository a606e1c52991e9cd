// src/probe/http.rs
use crate::config::HttpDescriptor;
use crate::error::{chain, ProbeError};
use reqwest::{header, Client};
use tokio::time::timeout;
use url::Url;

/// One-shot GET against the endpoint; healthy only on the expected status.
pub async fn probe(api: &HttpDescriptor) -> Result<(), ProbeError> {
    let url = Url::parse(&api.endpoint).map_err(|e| ProbeError::HttpCall(chain(e)))?;
    let limit = api.timeout();

    // Fresh client per call with no idle pool: nothing is reused between checks.
    let client = Client::builder()
        .timeout(limit)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| ProbeError::HttpCall(chain(e)))?;

    let response = timeout(
        limit,
        client
            .get(url.as_str())
            .header(header::CONNECTION, "close")
            .send(),
    )
    .await
    .map_err(|_| ProbeError::HttpCall(format!("request timed out after {:?}", limit)))?
    .map_err(|e| ProbeError::HttpCall(chain(e)))?;

    let actual = response.status().as_u16();
    if actual != api.status_code {
        return Err(ProbeError::UnexpectedStatus {
            expected: api.status_code,
            actual,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn descriptor(endpoint: String, status_code: u16, timeout: u64) -> HttpDescriptor {
        HttpDescriptor {
            endpoint,
            status_code,
            timeout,
        }
    }

    #[tokio::test]
    async fn test_expected_status_is_healthy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let api = descriptor(format!("{}/health", server.url()), 200, 0);
        probe(&api).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_mismatch_is_unexpected_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(500)
            .create_async()
            .await;

        let api = descriptor(format!("{}/health", server.url()), 200, 0);
        let err = probe(&api).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedStatusCode);
        assert!(matches!(
            err,
            ProbeError::UnexpectedStatus {
                expected: 200,
                actual: 500
            }
        ));
    }

    #[tokio::test]
    async fn test_non_200_expectation_matches() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ready")
            .with_status(204)
            .create_async()
            .await;

        let api = descriptor(format!("{}/ready", server.url()), 204, 0);
        probe(&api).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_call_failure() {
        // Port 9 (discard) is closed on any sane test host.
        let api = descriptor("http://127.0.0.1:9/health".into(), 200, 200);
        let err = probe(&api).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HttpCallFailed);
    }

    #[tokio::test]
    async fn test_unset_timeout_behaves_like_explicit_default() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let endpoint = format!("{}/health", server.url());
        let unset = probe(&descriptor(endpoint.clone(), 200, 0)).await;
        let explicit = probe(&descriptor(endpoint, 200, 1000)).await;

        assert!(unset.is_ok());
        assert!(explicit.is_ok());
    }
}
