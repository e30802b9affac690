use serial_test::serial;
use temp_env::with_vars;

use super::*;
use crate::Error;
use crate::DEFAULT_PORT;

fn cleanup_all_linda_env_vars() {
    for (key, _) in std::env::vars() {
        if key.starts_with("LINDA__") || key == CONFIG_PATH_ENV {
            std::env::remove_var(&key);
        }
    }
}

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let config = LindaConfig::default();

    assert_eq!(config.server.listen_address.port(), DEFAULT_PORT);
    assert_eq!(config.server.max_line_length, 64 * 1024);
    assert!(config.server.port_file.is_none());
    assert!(!config.monitoring.prometheus_enabled);
    assert_eq!(config.logging.default_filter, "info");
    assert!(config.logging.log_file().is_none());
}

#[test]
#[serial]
fn new_should_merge_environment_overrides() {
    cleanup_all_linda_env_vars();
    with_vars(
        vec![
            ("LINDA__SERVER__MAX_LINE_LENGTH", Some("1025")),
            ("LINDA__SERVER__LISTEN_ADDRESS", Some("127.0.0.1:6000")),
        ],
        || {
            let config = LindaConfig::new().unwrap();

            assert_eq!(config.server.max_line_length, 1025);
            assert_eq!(config.server.listen_address, "127.0.0.1:6000".parse().unwrap());
        },
    );
}

#[test]
#[serial]
fn with_override_config_should_merge_file_settings() {
    cleanup_all_linda_env_vars();
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("dynamic_config.toml");

    std::fs::write(
        &config_path,
        r#"
        [server]
        worker_threads = 8

        [logging]
        log_dir = "/tmp/linda-logs"
        "#,
    )
    .unwrap();

    let empty_vars: Vec<(&str, Option<&str>)> = vec![];
    with_vars(empty_vars, || {
        let base_config = LindaConfig::new().expect("success");
        let config = base_config
            .with_override_config(config_path.to_str().unwrap())
            .unwrap();

        assert_eq!(config.server.worker_threads, 8);
        assert_eq!(config.server.listen_address.port(), DEFAULT_PORT);
        assert_eq!(
            config.logging.log_file(),
            Some(std::path::PathBuf::from("/tmp/linda-logs/linda.log"))
        );
    });
}

#[test]
#[serial]
fn environment_variables_should_have_highest_priority() {
    cleanup_all_linda_env_vars();
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("test_config.toml");
    std::fs::write(
        &config_path,
        r#"
        [server]
        listen_address = "127.0.0.1:7000"
        max_blocking_threads = 64

        [monitoring]
        prometheus_enabled = true
        prometheus_port = 9200
        "#,
    )
    .unwrap();

    with_vars(
        vec![
            ("CONFIG_PATH", Some(config_path.to_str().unwrap())),
            ("LINDA__SERVER__MAX_BLOCKING_THREADS", Some("32")),
        ],
        || {
            let config = LindaConfig::new().unwrap();

            assert_eq!(config.server.listen_address.port(), 7000);
            assert_eq!(config.server.max_blocking_threads, 32);
            assert!(config.monitoring.prometheus_enabled);
            assert_eq!(config.monitoring.prometheus_port, 9200);
        },
    );
}

#[test]
#[serial]
fn missing_config_path_file_should_fail() {
    cleanup_all_linda_env_vars();
    with_vars(vec![("CONFIG_PATH", Some("/definitely/not/here.toml"))], || {
        assert!(LindaConfig::new().is_err());
    });
}

#[test]
fn validation_should_accept_defaults() {
    assert!(LindaConfig::default().validate().is_ok());
}

#[test]
fn validation_should_reject_tiny_line_limit() {
    let mut config = LindaConfig::default();
    config.server.max_line_length = 4;

    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn validation_should_reject_zero_threads() {
    let mut config = LindaConfig::default();
    config.server.worker_threads = 0;
    assert!(config.validate().is_err());

    let mut config = LindaConfig::default();
    config.server.max_blocking_threads = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_privileged_prometheus_port() {
    let mut config = LindaConfig::default();
    config.monitoring.prometheus_enabled = true;
    config.monitoring.prometheus_port = 80;
    assert!(config.validate().is_err());

    let mut config = LindaConfig::default();
    config.monitoring.prometheus_enabled = true;
    config.monitoring.prometheus_port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_empty_log_filter() {
    let mut config = LindaConfig::default();
    config.logging.default_filter = "  ".into();

    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_prometheus_port_equal_to_listen_port() {
    let mut config = LindaConfig::default();
    config.monitoring.prometheus_enabled = true;
    config.monitoring.prometheus_port = DEFAULT_PORT;

    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn validation_should_ignore_prometheus_port_when_disabled() {
    let mut config = LindaConfig::default();
    config.monitoring.prometheus_port = DEFAULT_PORT;

    assert!(config.validate().is_ok());
}

#[test]
fn debug_output_should_include_every_section() {
    let mut config = LindaConfig::default();
    config.logging.log_dir = Some("/var/log/linda".into());

    let rendered = format!("{:?}", config);

    assert!(rendered.contains("server"));
    assert!(rendered.contains("monitoring"));
    assert!(rendered.contains("default_filter"));
    assert!(rendered.contains("/var/log/linda"));
}
