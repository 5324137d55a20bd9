use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.hub.queue_capacity, 100);
    assert_eq!(settings.logging.level, "info");
}

#[test]
#[serial]
fn test_load_config_without_sources_uses_defaults() {
    temp_env::with_vars_unset(
        ["TOPICHUB_HUB__QUEUE_CAPACITY", "TOPICHUB_LOGGING__LEVEL"],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.hub.queue_capacity, 100);
            assert_eq!(cfg.logging.level, "info");
        },
    );
}

#[test]
#[serial]
fn test_load_config_from_env_overrides_defaults() {
    temp_env::with_vars(
        [
            ("TOPICHUB_HUB__QUEUE_CAPACITY", Some("32")),
            ("TOPICHUB_LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.hub.queue_capacity, 32);
            assert_eq!(cfg.logging.level, "debug");
        },
    );
}

#[test]
#[serial]
fn test_load_config_rejects_zero_capacity() {
    temp_env::with_var("TOPICHUB_HUB__QUEUE_CAPACITY", Some("0"), || {
        assert!(load_config().is_err());
    });
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    // load_config reads config/default.* relative to the working directory
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [hub]
        queue_capacity = 5
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let result = temp_env::with_vars_unset(
        ["TOPICHUB_HUB__QUEUE_CAPACITY", "TOPICHUB_LOGGING__LEVEL"],
        load_config,
    );

    env::set_current_dir(orig).expect("restore cwd");

    let cfg = result.expect("load_config failed");
    assert_eq!(cfg.hub.queue_capacity, 5);
    assert_eq!(cfg.logging.level, "info");
}
