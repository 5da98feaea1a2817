//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `RFS__`-prefixed environment variables. Every section
//! has defaults, so the server starts with no configuration file at all.

pub mod app;
pub mod database;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{HierarchyConfig, StoreBackend, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml` + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Item store selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Hierarchy engine settings.
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with `RFS__`
    /// (for example `RFS__SERVER__PORT=9000`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RFS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config should load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.hierarchy.serialize_mutations);
        assert_eq!(config.hierarchy.max_tree_depth, 64);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [store]
            backend = "postgres"

            [hierarchy]
            serialize_mutations = false
            "#,
        )
        .expect("config should load");

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_address(), "0.0.0.0:9090");
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert!(!config.hierarchy.serialize_mutations);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_toml("[store]\nbackend = \"neo4j\"\n")
            .expect_err("unknown backend must fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
