// src/probe/postgres.rs
use crate::config::PostgresDescriptor;
use crate::error::{chain, ProbeError};
use sqlx::{Connection, PgConnection};
use tracing::debug;

/// Open a connection, ping it, and close it again whatever the ping says.
pub async fn probe(psql: &PostgresDescriptor) -> Result<(), ProbeError> {
    let mut conn = PgConnection::connect(&psql.conn)
        .await
        .map_err(|e| ProbeError::Database(chain(e)))?;

    let pinged = conn.ping().await;

    if let Err(e) = conn.close().await {
        debug!("Failed to close postgres connection cleanly: {}", e);
    }

    pinged.map_err(|e| ProbeError::Database(chain(e)))
}
