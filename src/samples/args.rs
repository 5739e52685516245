//! Command-line arguments for the sample programs.
//!
//! All arguments are positional. A usage error exits with [`USAGE_EXIT_CODE`]
//! before any connection is attempted.

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::Settings;
use crate::session::{SessionProperties, UserVpn};
use crate::utils::Result;

pub const USAGE_EXIT_CODE: i32 = -1;

/// Arguments of the request/reply responder.
#[derive(Debug, Parser)]
#[command(name = "basic_replier", about = "Replies to requests on the request topic")]
pub struct ReplierArgs {
    /// Broker address as <host:port>
    pub host: String,
}

impl ReplierArgs {
    /// Credentials come from configuration; only the host is given.
    pub fn session_properties(&self, settings: &Settings) -> Result<SessionProperties> {
        SessionProperties::new(
            &self.host,
            settings.connection.default_port,
            settings.session.username.clone(),
            settings.session.password.clone(),
            settings.session.vpn.clone(),
        )
    }
}

/// Arguments of the queue producer and consumer.
#[derive(Debug, Parser)]
pub struct QueueArgs {
    /// Broker address as <host:port>
    pub host: String,
    /// Message VPN
    pub vpn: String,
    /// Client username
    pub username: String,
    /// Client password
    pub password: String,
}

impl QueueArgs {
    pub fn session_properties(&self, settings: &Settings) -> Result<SessionProperties> {
        SessionProperties::new(
            &self.host,
            settings.connection.default_port,
            self.username.clone(),
            self.password.clone(),
            self.vpn.clone(),
        )
    }
}

/// Arguments of the topic publisher, subscriber and requestor.
#[derive(Debug, Parser)]
pub struct TopicArgs {
    /// Broker address as <host:port>
    pub host: String,
    /// Credentials as <client-username@message-vpn>
    #[arg(value_name = "USERNAME@VPN")]
    pub user_vpn: UserVpn,
    /// Client password
    pub password: Option<String>,
}

impl TopicArgs {
    pub fn session_properties(&self, settings: &Settings) -> Result<SessionProperties> {
        SessionProperties::new(
            &self.host,
            settings.connection.default_port,
            self.user_vpn.username.clone(),
            self.password.clone().unwrap_or_default(),
            self.user_vpn.vpn.clone(),
        )
    }
}

/// Parses the process arguments, exiting on a usage error.
///
/// `--help` and `--version` print and exit successfully; anything else that
/// fails to parse prints usage and exits with [`USAGE_EXIT_CODE`].
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(USAGE_EXIT_CODE)
        }
    }
}
