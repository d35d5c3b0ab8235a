//! Server settings loaded via OrthoConfig.
//!
//! Values layer as OrthoConfig defines: CLI flags, then `COMPLAINTS_*`
//! environment variables, then configuration files.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use complaints::domain::{AuthValidationError, RegistrationDetails};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Errors raised while turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The host does not parse as an IP address.
    #[error("invalid host '{host}': {source}")]
    InvalidHost {
        /// Configured host.
        host: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// Only one of the admin e-mail and password was set.
    #[error("admin bootstrap needs both an email and a password")]
    IncompleteAdmin,
    /// The admin bootstrap values failed account validation.
    #[error("invalid admin bootstrap account: {0}")]
    InvalidAdmin(#[from] AuthValidationError),
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPLAINTS")]
pub struct ServerSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<String>,
    /// TCP port; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. In-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Display name for the bootstrap admin.
    pub admin_name: Option<String>,
    /// E-mail of the account promoted at startup.
    pub admin_email: Option<String>,
    /// Password for the bootstrap admin.
    pub admin_password: Option<String>,
}

impl ServerSettings {
    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|source| SettingsError::InvalidHost {
                    host: host.to_owned(),
                    source,
                })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Admin account to ensure at startup, if one is configured.
    ///
    /// Setting only one of e-mail and password is an error rather than a
    /// silent skip.
    pub fn admin_account(&self) -> Result<Option<RegistrationDetails>, SettingsError> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) => {
                let name = self.admin_name.as_deref().unwrap_or(DEFAULT_ADMIN_NAME);
                Ok(Some(RegistrationDetails::try_from_parts(
                    name, email, password,
                )?))
            }
            _ => Err(SettingsError::IncompleteAdmin),
        }
    }
}
