// src/probe/redis.rs
use crate::config::RedisDescriptor;
use crate::error::{chain, ProbeError};

/// Connect and issue a PING.
pub async fn probe(red: &RedisDescriptor) -> Result<(), ProbeError> {
    let client = redis::Client::open(redis_url(&red.conn))
        .map_err(|e| ProbeError::Store(chain(e)))?;

    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| ProbeError::Store(chain(e)))?;

    redis::cmd("PING")
        .query_async::<_, String>(&mut conn)
        .await
        .map_err(|e| ProbeError::Store(chain(e)))?;

    Ok(())
}

/// Dependency files usually carry bare `host:port` targets.
fn redis_url(conn: &str) -> String {
    if conn.contains("://") {
        conn.to_string()
    } else {
        format!("redis://{}", conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bare_host_gets_scheme() {
        assert_eq!(redis_url("localhost:6379"), "redis://localhost:6379");
        assert_eq!(redis_url("rediss://cache:6380/0"), "rediss://cache:6380/0");
    }

    #[test]
    fn test_tls_targets_are_supported() {
        redis::Client::open(redis_url("rediss://127.0.0.1:6380/0")).unwrap();
    }

    #[tokio::test]
    async fn test_closed_port_is_store_unreachable() {
        let red = RedisDescriptor {
            conn: "127.0.0.1:9".into(),
        };

        let err = probe(&red).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnreachable);
    }
}
