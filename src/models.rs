use serde::Serialize;
use std::fmt;

use crate::config;

/// Account and endpoint settings for one grid connection.
///
/// All seven fields are set together and never change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    host: String,
    port: u16,
    user_name: String,
    password: String,
    home_directory: String,
    zone: String,
    default_storage_resource: String,
}

/// Printable view of [`ConnectionParameters`] with the password masked.
#[derive(Debug, Serialize)]
pub struct RedactedParameters<'a> {
    pub host: &'a str,
    pub port: u16,
    pub user_name: &'a str,
    pub password: &'static str,
    pub home_directory: &'a str,
    pub zone: &'a str,
    pub default_storage_resource: &'a str,
}

const PASSWORD_MASK: &str = "********";

impl ConnectionParameters {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user_name: impl Into<String>,
        password: impl Into<String>,
        home_directory: impl Into<String>,
        zone: impl Into<String>,
        default_storage_resource: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user_name: user_name.into(),
            password: password.into(),
            home_directory: home_directory.into(),
            zone: zone.into(),
            default_storage_resource: default_storage_resource.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn home_directory(&self) -> &str {
        &self.home_directory
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn default_storage_resource(&self) -> &str {
        &self.default_storage_resource
    }

    /// `user@host:port`, used in log lines and error context.
    pub fn endpoint(&self) -> String {
        format!("{}@{}:{}", self.user_name, self.host, self.port)
    }

    pub fn redacted(&self) -> RedactedParameters<'_> {
        RedactedParameters {
            host: &self.host,
            port: self.port,
            user_name: &self.user_name,
            password: PASSWORD_MASK,
            home_directory: &self.home_directory,
            zone: &self.zone,
            default_storage_resource: &self.default_storage_resource,
        }
    }
}

impl Default for ConnectionParameters {
    fn default() -> Self {
        Self::new(
            config::DEFAULT_HOST,
            config::DEFAULT_PORT,
            config::DEFAULT_USER_NAME,
            config::DEFAULT_PASSWORD,
            config::DEFAULT_HOME_DIRECTORY,
            config::DEFAULT_ZONE,
            config::DEFAULT_STORAGE_RESOURCE,
        )
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.redacted(), f)
    }
}
