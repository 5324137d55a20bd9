//! The `utils` module provides the pieces shared across the `topichub` crate:
//! the error types and the logging bootstrap.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::error::{HubError, TryRecvError};
    use super::logging;
    use crate::broker::topic::SubscriberId;
    use crate::config::LoggingSettings;

    fn settings(level: &str) -> LoggingSettings {
        LoggingSettings {
            level: level.to_string(),
        }
    }

    #[test]
    fn logging_init_accepts_repeated_calls() {
        // Should not panic
        logging::init(&settings("info"));
        logging::init(&settings("debug"));
    }

    #[test]
    fn logging_level_directive_falls_back_to_info() {
        assert_eq!(logging::level_directive("nonsense"), "info");
        assert_eq!(logging::level_directive(""), "info");
        assert_eq!(logging::level_directive(" WARNING "), "warn");
        assert_eq!(logging::level_directive("Trace"), "trace");
    }

    #[test]
    #[serial]
    fn logging_filter_uses_configured_level_without_rust_log() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = logging::build_filter(&settings("verbose"));
            assert_eq!(filter.to_string(), "info");

            let filter = logging::build_filter(&settings("debug"));
            assert_eq!(filter.to_string(), "debug");
        });
    }

    #[test]
    #[serial]
    fn logging_filter_prefers_rust_log() {
        temp_env::with_var("RUST_LOG", Some("topichub=trace"), || {
            let filter = logging::build_filter(&settings("error"));
            assert_eq!(filter.to_string(), "topichub=trace");
        });
    }

    #[test]
    fn hub_error_messages_name_the_subscriber() {
        let err = HubError::AlreadySubscribed(SubscriberId::from("conn-1"));
        assert_eq!(err.to_string(), "subscriber conn-1 is already subscribed");

        let err = HubError::NotSubscribed(SubscriberId::from("conn-2"));
        assert_eq!(err.to_string(), "subscriber conn-2 is not subscribed");

        assert_eq!(HubError::HubClosed.to_string(), "hub is closed");
    }

    #[test]
    fn try_recv_error_maps_from_mpsc() {
        use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;

        assert_eq!(
            TryRecvError::from(MpscTryRecvError::Empty),
            TryRecvError::Empty
        );
        assert_eq!(
            TryRecvError::from(MpscTryRecvError::Disconnected),
            TryRecvError::Closed
        );
    }
}
