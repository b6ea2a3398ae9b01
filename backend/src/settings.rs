//! Runtime configuration loaded via OrthoConfig.
//!
//! One settings struct per external concern. Accessors apply development
//! fallbacks where a fallback is safe and report [`ConfigError`] where it is
//! not: the vehicle lookup API has no usable placeholder, so a missing key
//! or URL stops startup.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::outbound::supplier::{
    DEFAULT_SUPPLIER_TIMEOUT, SupplierClientConfig, SupplierCredentials,
};
use crate::outbound::vehicle::DEFAULT_VEHICLE_LOOKUP_TIMEOUT;

const DEV_SUPPLIER_ENDPOINT: &str = "http://127.0.0.1:8090/soap";
const DEV_SUPPLIER_NAMESPACE: &str = "http://tempuri.org/";
const DEV_SUPPLIER_LOGIN: &str = "dev-login";
const DEV_SUPPLIER_PASSWORD: &str = "dev-password";
const DEV_SUPPLIER_USER_ID: &str = "0";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("missing required setting {name}")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },
    /// A URL setting does not parse.
    #[error("setting {name} is not a valid URL: {source}")]
    InvalidUrl {
        /// Environment variable name.
        name: &'static str,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The bind address does not parse.
    #[error("setting GLASSTRADE_BIND_ADDR is not a socket address: {value}")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
    },
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { name, source })
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

fn or_dev_fallback<'a>(value: Option<&'a String>, name: &'static str, fallback: &'a str) -> &'a str {
    present(value).unwrap_or_else(|| {
        warn!(setting = name, "setting absent; using development fallback");
        fallback
    })
}

/// Supplier SOAP API settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPPLIER")]
pub struct SupplierSettings {
    /// SOAP endpoint URL.
    pub endpoint: Option<String>,
    /// Service namespace used for body elements and `SOAPAction`.
    pub namespace: Option<String>,
    /// Account login.
    pub login: Option<String>,
    /// Account password.
    pub password: Option<String>,
    /// Account user identifier.
    pub user_id: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl SupplierSettings {
    /// Per-call timeout, defaulting to 30 seconds.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map_or(DEFAULT_SUPPLIER_TIMEOUT, Duration::from_secs)
    }

    /// Build the SOAP client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the endpoint does not parse.
    pub fn client_config(&self) -> Result<SupplierClientConfig, ConfigError> {
        let endpoint = or_dev_fallback(
            self.endpoint.as_ref(),
            "SUPPLIER_ENDPOINT",
            DEV_SUPPLIER_ENDPOINT,
        );
        Ok(SupplierClientConfig {
            endpoint: parse_url("SUPPLIER_ENDPOINT", endpoint)?,
            namespace: or_dev_fallback(
                self.namespace.as_ref(),
                "SUPPLIER_NAMESPACE",
                DEV_SUPPLIER_NAMESPACE,
            )
            .to_owned(),
            credentials: SupplierCredentials {
                login: or_dev_fallback(self.login.as_ref(), "SUPPLIER_LOGIN", DEV_SUPPLIER_LOGIN)
                    .to_owned(),
                password: or_dev_fallback(
                    self.password.as_ref(),
                    "SUPPLIER_PASSWORD",
                    DEV_SUPPLIER_PASSWORD,
                )
                .to_owned(),
                user_id: or_dev_fallback(
                    self.user_id.as_ref(),
                    "SUPPLIER_USER_ID",
                    DEV_SUPPLIER_USER_ID,
                )
                .to_owned(),
            },
            timeout: self.timeout(),
        })
    }
}

/// Vehicle registration lookup API settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VEHICLE_LOOKUP")]
pub struct VehicleLookupSettings {
    /// API key sent as `auth_apikey`.
    pub api_key: Option<String>,
    /// Lookup endpoint URL.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl VehicleLookupSettings {
    /// API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when absent or blank.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        present(self.api_key.as_ref()).ok_or(ConfigError::Missing {
            name: "VEHICLE_LOOKUP_API_KEY",
        })
    }

    /// Lookup endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when absent or malformed.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = present(self.base_url.as_ref()).ok_or(ConfigError::Missing {
            name: "VEHICLE_LOOKUP_BASE_URL",
        })?;
        parse_url("VEHICLE_LOOKUP_BASE_URL", raw)
    }

    /// Request timeout, defaulting to 10 seconds.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map_or(DEFAULT_VEHICLE_LOOKUP_TIMEOUT, Duration::from_secs)
    }
}

/// HTTP server and row store settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GLASSTRADE")]
pub struct ServerSettings {
    /// Listen address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory lead store is used.
    pub database_url: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = present(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| ConfigError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Database URL when configured.
    pub fn database_url(&self) -> Option<&str> {
        present(self.database_url.as_ref())
    }
}
