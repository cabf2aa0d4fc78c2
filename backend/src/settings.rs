//! Server settings loaded via OrthoConfig.
//!
//! Values come from `SHAREPLATE_*` environment variables or matching CLI
//! flags. The store is addressed either by a full `db_uri` or by the
//! `db_username`/`db_password`/`db_host` triple, which is assembled into an
//! Atlas-style `mongodb+srv://` URI.
//!
//! Deployments that predate the prefix may still set the bare `PORT`,
//! `DB_USERNAME` and `DB_PASSWORD` variables; [`ServerSettings::with_env_fallbacks`]
//! reads those only where the prefixed value is unset.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::outbound::persistence::StoreConfig;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const PORT_FALLBACK: &str = "PORT";
const USERNAME_FALLBACK: &str = "DB_USERNAME";
const PASSWORD_FALLBACK: &str = "DB_PASSWORD";
const APP_NAME: &str = "shareplate";

/// Configuration values for the listing gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHAREPLATE")]
pub struct ServerSettings {
    /// TCP port to listen on; 3000 when unset.
    pub port: Option<u16>,
    /// Interface to bind.
    pub bind_host: Option<String>,
    /// Full MongoDB connection string; wins over the credential triple.
    pub db_uri: Option<String>,
    /// Atlas user name.
    pub db_username: Option<String>,
    /// Atlas password.
    pub db_password: Option<String>,
    /// Atlas cluster host, e.g. `cluster0.abcde.mongodb.net`.
    pub db_host: Option<String>,
    /// Database holding the listings collection.
    pub db_name: Option<String>,
    /// Listings collection name.
    pub collection: Option<String>,
    /// Connect and server-selection timeout in seconds.
    #[ortho_config(default = 10)]
    pub connect_timeout_secs: u64,
}

impl ServerSettings {
    /// Return the bind address as a host/port pair.
    pub fn bind_addr(&self) -> (String, u16) {
        let host = self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST);
        (host.to_owned(), self.port.unwrap_or(DEFAULT_PORT))
    }

    /// Fill unset values from the unprefixed `PORT`, `DB_USERNAME` and
    /// `DB_PASSWORD` environment variables.
    #[must_use]
    pub fn with_env_fallbacks(self) -> Self {
        self.with_fallbacks_from(|name| std::env::var(name).ok())
    }

    fn with_fallbacks_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.port.is_none() {
            self.port = lookup(PORT_FALLBACK).and_then(|raw| match raw.trim().parse() {
                Ok(port) => Some(port),
                Err(error) => {
                    warn!(%error, value = %raw, "ignoring unparseable PORT");
                    None
                }
            });
        }
        if self.db_username.is_none() {
            self.db_username = lookup(USERNAME_FALLBACK);
        }
        if self.db_password.is_none() {
            self.db_password = lookup(PASSWORD_FALLBACK);
        }
        self
    }

    /// Return the configured database name, falling back to the default.
    pub fn db_name(&self) -> &str {
        self.db_name
            .as_deref()
            .unwrap_or(StoreConfig::DEFAULT_DATABASE)
    }

    /// Return the configured collection name, falling back to the default.
    pub fn collection(&self) -> &str {
        self.collection
            .as_deref()
            .unwrap_or(StoreConfig::DEFAULT_COLLECTION)
    }

    /// Return the store URI, or `None` when no store is configured.
    pub fn store_uri(&self) -> Option<String> {
        if let Some(uri) = self.db_uri.as_deref().filter(|uri| !uri.trim().is_empty()) {
            return Some(uri.to_owned());
        }
        let (Some(user), Some(password), Some(host)) = (
            self.db_username.as_deref(),
            self.db_password.as_deref(),
            self.db_host.as_deref(),
        ) else {
            return None;
        };
        Some(format!(
            "mongodb+srv://{}:{}@{host}/?retryWrites=true&w=majority&appName={APP_NAME}",
            urlencoding::encode(user),
            urlencoding::encode(password),
        ))
    }

    /// Build the store configuration, or `None` when no store is configured.
    pub fn store_config(&self) -> Option<StoreConfig> {
        self.store_uri().map(|uri| {
            StoreConfig::new(uri)
                .with_database(self.db_name())
                .with_collection(self.collection())
                .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
        })
    }
}
