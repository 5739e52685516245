use serde::Deserialize;

/// Top-level configuration for the sample programs.
///
/// Everything a sample would otherwise hardcode (destination names, the
/// replier's credentials, the requestor timeout) lives here.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub session: SessionSettings,
    pub names: NameSettings,
    pub requestor: RequestorSettings,
    pub logging: LoggingSettings,
}

/// How `<host:port>` arguments are turned into broker endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionSettings {
    pub default_port: u16,
}

/// Credentials used by programs that only take a `<host:port>` argument.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub username: String,
    pub vpn: String,
    pub password: String,
}

/// Destination names shared by the producer/consumer and publisher/subscriber pairs.
#[derive(Debug, Deserialize, Clone)]
pub struct NameSettings {
    pub topic: String,
    pub request_topic: String,
    pub queue: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RequestorSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values are filled from defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PartialSettings {
    pub connection: Option<PartialConnectionSettings>,
    pub session: Option<PartialSessionSettings>,
    pub names: Option<PartialNameSettings>,
    pub requestor: Option<PartialRequestorSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialConnectionSettings {
    pub default_port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSessionSettings {
    pub username: Option<String>,
    pub vpn: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialNameSettings {
    pub topic: Option<String>,
    pub request_topic: Option<String>,
    pub queue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRequestorSettings {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings { default_port: 8080 },
            session: SessionSettings {
                username: "default".to_string(),
                vpn: "default".to_string(),
                password: String::new(),
            },
            names: NameSettings {
                topic: "tutorial/topic".to_string(),
                request_topic: "tutorial/requests".to_string(),
                queue: "Q/tutorial".to_string(),
            },
            requestor: RequestorSettings { timeout_secs: 10 },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Overlays whatever `partial` specifies on top of the defaults.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Settings::default();

        Settings {
            connection: ConnectionSettings {
                default_port: partial
                    .connection
                    .as_ref()
                    .and_then(|c| c.default_port)
                    .unwrap_or(default.connection.default_port),
            },
            session: SessionSettings {
                username: partial
                    .session
                    .as_ref()
                    .and_then(|s| s.username.clone())
                    .unwrap_or(default.session.username),
                vpn: partial
                    .session
                    .as_ref()
                    .and_then(|s| s.vpn.clone())
                    .unwrap_or(default.session.vpn),
                password: partial
                    .session
                    .as_ref()
                    .and_then(|s| s.password.clone())
                    .unwrap_or(default.session.password),
            },
            names: NameSettings {
                topic: partial
                    .names
                    .as_ref()
                    .and_then(|n| n.topic.clone())
                    .unwrap_or(default.names.topic),
                request_topic: partial
                    .names
                    .as_ref()
                    .and_then(|n| n.request_topic.clone())
                    .unwrap_or(default.names.request_topic),
                queue: partial
                    .names
                    .as_ref()
                    .and_then(|n| n.queue.clone())
                    .unwrap_or(default.names.queue),
            },
            requestor: RequestorSettings {
                timeout_secs: partial
                    .requestor
                    .as_ref()
                    .and_then(|r| r.timeout_secs)
                    .unwrap_or(default.requestor.timeout_secs),
            },
            logging: LoggingSettings {
                level: partial
                    .logging
                    .as_ref()
                    .and_then(|l| l.level.clone())
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
