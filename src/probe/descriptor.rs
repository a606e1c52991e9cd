// src/probe/descriptor.rs
use crate::config::{
    DependencySet, HttpDescriptor, PostgresDescriptor, RedisDescriptor, RpcDescriptor,
};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Dependency category. Each category gets at most one task per checkup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Http,
    RelationalDb,
    KvStore,
    Rpc,
}

impl Kind {
    /// Launch order used by the orchestrator.
    pub const ALL: [Kind; 4] = [Kind::Http, Kind::RelationalDb, Kind::KvStore, Kind::Rpc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Http => "http",
            Kind::RelationalDb => "relational-db",
            Kind::KvStore => "kv-store",
            Kind::Rpc => "rpc",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Http(HttpDescriptor),
    RelationalDb(PostgresDescriptor),
    KvStore(RedisDescriptor),
    Rpc(RpcDescriptor),
}

impl Descriptor {
    /// Loggable identity: endpoint or host, or the connection string with its
    /// password masked.
    pub fn identity(&self) -> String {
        match self {
            Descriptor::Http(d) => d.endpoint.clone(),
            Descriptor::RelationalDb(d) => redact(&d.conn),
            Descriptor::KvStore(d) => redact(&d.conn),
            Descriptor::Rpc(d) => d.host.clone(),
        }
    }
}

impl DependencySet {
    /// Descriptors of one category, in file order.
    pub fn descriptors(&self, kind: Kind) -> Vec<Descriptor> {
        match kind {
            Kind::Http => self.api.iter().cloned().map(Descriptor::Http).collect(),
            Kind::RelationalDb => self
                .database
                .postgres
                .iter()
                .cloned()
                .map(Descriptor::RelationalDb)
                .collect(),
            Kind::KvStore => self
                .database
                .redis
                .iter()
                .cloned()
                .map(Descriptor::KvStore)
                .collect(),
            Kind::Rpc => self.grpc.iter().cloned().map(Descriptor::Rpc).collect(),
        }
    }
}

fn redact(conn: &str) -> String {
    if let Ok(mut url) = Url::parse(conn) {
        if url.password().is_some() && url.set_password(Some("***")).is_ok() {
            return url.to_string();
        }
        return conn.to_string();
    }

    // libpq key/value form: "host=db user=app password=secret"
    conn.split_whitespace()
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key.eq_ignore_ascii_case("password") => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_masks_url_password() {
        let d = Descriptor::RelationalDb(PostgresDescriptor {
            conn: "postgres://app:hunter2@db:5432/app".into(),
        });
        assert_eq!(d.identity(), "postgres://app:***@db:5432/app");
    }

    #[test]
    fn test_identity_masks_key_value_password() {
        let d = Descriptor::RelationalDb(PostgresDescriptor {
            conn: "host=db user=app password=hunter2 sslmode=disable".into(),
        });
        assert_eq!(
            d.identity(),
            "host=db user=app password=*** sslmode=disable"
        );
    }

    #[test]
    fn test_identity_leaves_plain_targets_alone() {
        let d = Descriptor::KvStore(RedisDescriptor {
            conn: "localhost:6379".into(),
        });
        assert_eq!(d.identity(), "localhost:6379");
    }

    #[test]
    fn test_descriptors_preserve_order() {
        let mut deps = DependencySet::default();
        for host in ["a:1", "b:2", "c:3"] {
            deps.grpc.push(RpcDescriptor {
                host: host.into(),
                timeout: 0,
            });
        }

        let ids: Vec<_> = deps
            .descriptors(Kind::Rpc)
            .iter()
            .map(Descriptor::identity)
            .collect();
        assert_eq!(ids, vec!["a:1", "b:2", "c:3"]);
        assert!(deps.descriptors(Kind::Http).is_empty());
    }
}
