//! Client configuration resolved from command-line arguments.

use tokio_tungstenite::tungstenite::http::HeaderValue;

use crate::{
    cookie::{IDENTITY_COOKIE, get_cookie},
    domain::{ConnectionIdentity, QUEUE_DISPLAY_SLOTS},
    endpoint::PageLocation,
    error::ConfigError,
    time::TimeFormat,
    view::DashboardSync,
};

/// Validated settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway URL derived from the page URL
    pub websocket_url: String,
    /// Guild id taken from the page path
    pub guild_id: String,
    /// Identity read from the `identifier` cookie
    pub identity: ConnectionIdentity,
    /// Raw cookie string, sent as the `Cookie` header on connect
    pub cookie_header: Option<HeaderValue>,
    pub time_format: TimeFormat,
    pub queue_slots: usize,
}

impl ClientConfig {
    /// Resolve the configuration for a dashboard page.
    ///
    /// # Arguments
    ///
    /// * `page_url` - Dashboard page URL, e.g. `https://host/dashboard/12345`
    /// * `cookies` - Cookie string in `name=value; name=value` form (may be empty)
    /// * `time_format` - Duration label policy
    pub fn from_page(
        page_url: &str,
        cookies: &str,
        time_format: TimeFormat,
    ) -> Result<Self, ConfigError> {
        let page = PageLocation::parse(page_url)?;
        let websocket_url = page.websocket_url()?;

        let cookie_header = if cookies.trim().is_empty() {
            None
        } else {
            Some(HeaderValue::from_str(cookies).map_err(|_| ConfigError::InvalidCookieHeader)?)
        };

        Ok(Self {
            websocket_url,
            guild_id: page.guild_id(),
            identity: ConnectionIdentity::new(get_cookie(cookies, IDENTITY_COOKIE)),
            cookie_header,
            time_format,
            queue_slots: QUEUE_DISPLAY_SLOTS,
        })
    }

    /// The pure sync logic configured for this session
    pub fn dashboard_sync(&self) -> DashboardSync {
        DashboardSync::new(self.guild_id.clone(), self.identity.clone())
            .with_time_format(self.time_format)
            .with_queue_slots(self.queue_slots)
    }
}
