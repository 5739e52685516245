use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::utils::{Result, SampleError};

/// Coordinates needed to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProperties {
    pub endpoint: Url,
    pub username: String,
    pub password: String,
    pub vpn: String,
}

impl SessionProperties {
    pub fn new(
        host: &str,
        default_port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        vpn: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(host, default_port)?,
            username: username.into(),
            password: password.into(),
            vpn: vpn.into(),
        })
    }
}

/// Turns a `<host:port>` argument into a WebSocket URL.
///
/// A missing scheme means `ws://`; a missing port means `default_port`.
pub fn parse_endpoint(host: &str, default_port: u16) -> Result<Url> {
    let invalid = |reason: &str| SampleError::InvalidEndpoint {
        endpoint: host.to_string(),
        reason: reason.to_string(),
    };

    let host = host.trim();
    if host.is_empty() {
        return Err(invalid("empty host"));
    }

    let raw = if host.contains("://") {
        host.to_string()
    } else {
        format!("ws://{host}")
    };

    let mut url = Url::parse(&raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(invalid("scheme must be ws or wss"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.scheme() == "ws" && !has_explicit_port(&raw) {
        url.set_port(Some(default_port))
            .map_err(|_| invalid("cannot set port"))?;
    }

    Ok(url)
}

// `Url::port` hides a port equal to the scheme default, so look at the raw text.
fn has_explicit_port(raw: &str) -> bool {
    let authority = raw
        .split_once("://")
        .map_or(raw, |(_, rest)| rest)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    match host_port.rsplit_once(':') {
        Some((host, port)) => {
            !port.is_empty()
                && port.chars().all(|c| c.is_ascii_digit())
                && (!host.starts_with('[') || host.ends_with(']'))
        }
        None => false,
    }
}

/// A `username@vpn` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserVpn {
    pub username: String,
    pub vpn: String,
}

impl FromStr for UserVpn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('@').collect();
        match parts.as_slice() {
            [username, vpn] if !username.is_empty() && !vpn.is_empty() => Ok(UserVpn {
                username: username.to_string(),
                vpn: vpn.to_string(),
            }),
            _ => Err(format!(
                "expected <client-username@message-vpn>, got '{s}'"
            )),
        }
    }
}

impl fmt::Display for UserVpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.vpn)
    }
}
