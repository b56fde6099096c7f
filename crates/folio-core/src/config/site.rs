//! Public site server configuration.

use serde::{Deserialize, Serialize};

/// Bind address, public URL and fallback identity of the portfolio site.
///
/// The identity fields stand in for the owner's profile when the backend
/// cannot serve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Canonical public URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Owner name shown when the profile is unavailable.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub email: String,
}

impl SiteConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            host: default_host(),
            port: default_port(),
            name: default_name(),
            title: default_title(),
            description: default_description(),
            email: String::new(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_name() -> String {
    "Portfolio".to_string()
}

fn default_title() -> String {
    "Software Engineer".to_string()
}

fn default_description() -> String {
    "Welcome to my portfolio".to_string()
}
