// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::backend::SearchBackendKind;
use crate::services::postgres::DEFAULT_TEXT_SEARCH_CONFIG;
use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub backend: SearchBackendKind,
    pub database_url: String,
    pub max_connections: u32,
    /// PostgreSQL text search configuration; ignored by SQLite.
    pub text_search_config: String,
    /// JSON file with channels and facet values. Without it only the default
    /// channel exists and facet values cannot be resolved.
    pub catalog_file: Option<PathBuf>,
    pub listen_addr: SocketAddr,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SearchConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = lookup("SEARCH_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse::<SearchBackendKind>()
            .map_err(|e| anyhow!(e))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow!("DATABASE_URL environment variable not set"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let text_search_config = lookup("TEXT_SEARCH_CONFIG")
            .unwrap_or_else(|| DEFAULT_TEXT_SEARCH_CONFIG.to_string());

        let catalog_file = lookup("CATALOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .map_err(|e| anyhow!("LISTEN_ADDR '{}' is not a socket address: {}", listen_addr, e))?;

        Ok(Self {
            backend,
            database_url,
            max_connections,
            text_search_config,
            catalog_file,
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            SearchConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")]))
                .unwrap();

        assert_eq!(config.backend, SearchBackendKind::Postgres);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.text_search_config, "english");
        assert!(config.catalog_file.is_none());
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn test_database_url_is_required() {
        let err = SearchConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_sqlite_backend() {
        let config = SearchConfig::from_lookup(lookup(&[
            ("SEARCH_BACKEND", "sqlite"),
            ("DATABASE_URL", "sqlite://search.db"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("CATALOG_FILE", "/etc/catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.backend, SearchBackendKind::Sqlite);
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.catalog_file, Some(PathBuf::from("/etc/catalog.json")));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = SearchConfig::from_lookup(lookup(&[
            ("SEARCH_BACKEND", "mysql"),
            ("DATABASE_URL", "mysql://localhost"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SEARCH_BACKEND"));
    }

    #[test]
    fn test_invalid_max_connections_falls_back_to_default() {
        let config = SearchConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_invalid_listen_addr_is_rejected() {
        let err = SearchConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("LISTEN_ADDR", "localhost"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("LISTEN_ADDR"));
    }
}
