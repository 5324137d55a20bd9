use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the hub and for logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub hub: HubSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the hub.
///
/// `queue_capacity` is the number of messages each subscriber queue holds
/// before further messages for that subscriber are dropped.
#[derive(Debug, Deserialize, Clone)]
pub struct HubSettings {
    pub queue_capacity: usize,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub hub: Option<PartialHubSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

/// Partial hub settings.
#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub queue_capacity: Option<usize>,
}

/// Partial logging settings.
#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            hub: HubSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
