//! Gateway endpoint and guild id derivation from the dashboard page URL.

use tokio_tungstenite::tungstenite::http::Uri;

use crate::error::ConfigError;

/// Path of the gateway on the dashboard host.
pub const WEBSOCKET_PATH: &str = "/websocket";

/// Prefix of dashboard page paths; the guild id follows it.
pub const DASHBOARD_PATH_PREFIX: &str = "/dashboard/";

/// A parsed dashboard page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    scheme: String,
    host: String,
    path: String,
}

impl PageLocation {
    /// Parse a page URL such as `https://host:8080/dashboard/12345`.
    pub fn parse(page_url: &str) -> Result<Self, ConfigError> {
        let uri: Uri = page_url
            .parse()
            .map_err(|_| ConfigError::InvalidPageUrl(page_url.to_string()))?;

        let scheme = uri
            .scheme_str()
            .ok_or_else(|| ConfigError::InvalidPageUrl(page_url.to_string()))?
            .to_ascii_lowercase();
        let host = uri
            .authority()
            .map(|authority| authority.as_str().to_string())
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConfigError::MissingHost(page_url.to_string()))?;

        Ok(Self {
            scheme,
            host,
            path: uri.path().to_string(),
        })
    }

    /// Map the page transport onto the gateway URL on the same host.
    ///
    /// `http` becomes `ws` and `https` becomes `wss`.
    pub fn websocket_url(&self) -> Result<String, ConfigError> {
        let scheme = match self.scheme.as_str() {
            "http" => "ws",
            "https" => "wss",
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        };
        Ok(format!("{}://{}{}", scheme, self.host, WEBSOCKET_PATH))
    }

    /// Guild id taken from the page path.
    pub fn guild_id(&self) -> String {
        guild_id(&self.path)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Extract the guild id: the path segment right after `/dashboard/`.
///
/// A path without the prefix is forwarded unchanged.
pub fn guild_id(path: &str) -> String {
    match path.strip_prefix(DASHBOARD_PATH_PREFIX) {
        Some(rest) => rest.split('/').next().unwrap_or_default().to_string(),
        None => path.to_string(),
    }
}
