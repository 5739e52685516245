mod settings;

use config::{Config, ConfigError, Environment, File};

pub use settings::{
    ConnectionSettings, LoggingSettings, NameSettings, PartialSettings, RequestorSettings,
    SessionSettings, Settings,
};

/// Loads the configuration from `config/default`, a `.env` file and
/// `POPSUB__*` environment variables, then merges it over the defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("POPSUB").separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(Settings::merge(partial))
}
