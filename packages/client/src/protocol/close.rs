//! Application close codes used by the dashboard gateway.

use std::fmt;

/// Close code received when the gateway ends the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayCloseCode {
    /// 1000 / 1001
    Normal(u16),
    /// 4000: refreshing the stored OAuth token failed
    TokenRefreshFailed,
    /// 4001: a payload was not JSON
    InvalidPayload,
    /// 4002: the client sent a receive-only op code
    InvalidOpCode,
    /// 4003: no login is stored for the identifier
    NotLoggedIn,
    /// 4004: the guild id is unknown to the bot
    InvalidGuild,
    /// 4005: identify was sent twice
    AlreadyAuthenticated,
    /// 4006: a message was sent before identifying
    NotAuthorized,
    /// Anything else
    Other(u16),
}

impl GatewayCloseCode {
    pub fn code(self) -> u16 {
        match self {
            GatewayCloseCode::Normal(code) | GatewayCloseCode::Other(code) => code,
            GatewayCloseCode::TokenRefreshFailed => 4000,
            GatewayCloseCode::InvalidPayload => 4001,
            GatewayCloseCode::InvalidOpCode => 4002,
            GatewayCloseCode::NotLoggedIn => 4003,
            GatewayCloseCode::InvalidGuild => 4004,
            GatewayCloseCode::AlreadyAuthenticated => 4005,
            GatewayCloseCode::NotAuthorized => 4006,
        }
    }

    /// Whether the close ends the session without an error
    pub fn is_normal(self) -> bool {
        matches!(self, GatewayCloseCode::Normal(_))
    }

    pub fn description(self) -> &'static str {
        match self {
            GatewayCloseCode::Normal(_) => "normal closure",
            GatewayCloseCode::TokenRefreshFailed => "token refresh failed",
            GatewayCloseCode::InvalidPayload => "invalid payload",
            GatewayCloseCode::InvalidOpCode => "invalid op code",
            GatewayCloseCode::NotLoggedIn => "not logged in",
            GatewayCloseCode::InvalidGuild => "invalid guild id",
            GatewayCloseCode::AlreadyAuthenticated => "already authenticated",
            GatewayCloseCode::NotAuthorized => "not authorized",
            GatewayCloseCode::Other(_) => "unknown close code",
        }
    }
}

impl From<u16> for GatewayCloseCode {
    fn from(code: u16) -> Self {
        match code {
            1000 | 1001 => GatewayCloseCode::Normal(code),
            4000 => GatewayCloseCode::TokenRefreshFailed,
            4001 => GatewayCloseCode::InvalidPayload,
            4002 => GatewayCloseCode::InvalidOpCode,
            4003 => GatewayCloseCode::NotLoggedIn,
            4004 => GatewayCloseCode::InvalidGuild,
            4005 => GatewayCloseCode::AlreadyAuthenticated,
            4006 => GatewayCloseCode::NotAuthorized,
            other => GatewayCloseCode::Other(other),
        }
    }
}

impl fmt::Display for GatewayCloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.description())
    }
}
