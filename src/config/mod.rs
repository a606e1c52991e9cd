// src/config/mod.rs
mod models;

pub use models::*;

use crate::error::CheckupError;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the dependency file (YAML or JSON) and validate it.
pub async fn load_dependencies<P: AsRef<Path>>(path: P) -> Result<DependencySet, CheckupError> {
    let path = path.as_ref();
    read_dependencies(path)
        .await
        .map_err(|e| CheckupError::ConfigLoadFailed {
            path: path.display().to_string(),
            reason: format!("{:#}", e),
        })
}

async fn read_dependencies(path: &Path) -> Result<DependencySet> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read dependencies file")?;

    let deps: DependencySet = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml")
    {
        serde_yaml::from_str(&contents).context("Failed to parse YAML dependencies")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON dependencies")?
    };

    deps.validate()?;
    Ok(deps)
}

/// Checkup settings from defaults overlaid with `CHECKUP_*` environment variables.
pub fn load_settings() -> Result<CheckupSettings> {
    let defaults = CheckupSettings::default();
    let settings = config::Config::builder()
        .set_default("verbose", defaults.verbose)?
        .set_default("fail_fast", defaults.fail_fast)?
        .set_default("deadline_ms", defaults.deadline_ms)?
        .set_default("rpc_default_timeout_ms", defaults.rpc_default_timeout_ms)?
        .add_source(config::Environment::with_prefix("CHECKUP").try_parsing(true))
        .build()
        .context("Failed to build checkup settings")?
        .try_deserialize::<CheckupSettings>()
        .context("Failed to deserialize checkup settings")?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_yaml_dependencies() {
        let path = temp_file(
            "deps.yaml",
            "api:\n  - endpoint: http://localhost:9000/health\n    statuscode: 200\n",
        );

        let deps = load_dependencies(&path).await.unwrap();
        assert_eq!(deps.api.len(), 1);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_load_json_dependencies() {
        let path = temp_file(
            "deps.json",
            r#"{"database": {"redis": [{"conn": "localhost:6379"}]}}"#,
        );

        let deps = load_dependencies(&path).await.unwrap();
        assert_eq!(deps.database.redis.len(), 1);
        assert!(deps.api.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_config_load_failure() {
        let err = load_dependencies("/definitely/not/here.yaml")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckupError::ConfigLoadFailed { .. }));
        assert!(err.causes().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_file_is_config_load_failure() {
        let path = temp_file("broken.yaml", "api: [ this is not: valid");

        let err = load_dependencies(&path).await.unwrap_err();
        assert!(matches!(err, CheckupError::ConfigLoadFailed { .. }));

        std::fs::remove_file(path).ok();
    }
}
