mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{HubSettings, LoggingSettings, Settings};

/// Prefix of the environment variables read by [`load_config`], e.g.
/// `TOPICHUB_HUB__QUEUE_CAPACITY=32`.
pub const ENV_PREFIX: &str = "TOPICHUB";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the hub and logging configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let settings = Settings {
        hub: HubSettings {
            queue_capacity: partial
                .hub
                .as_ref()
                .and_then(|h| h.queue_capacity)
                .unwrap_or(default.hub.queue_capacity),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    };

    if settings.hub.queue_capacity == 0 {
        return Err(ConfigError::Message(
            "hub.queue_capacity must be greater than zero".to_string(),
        ));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests;
