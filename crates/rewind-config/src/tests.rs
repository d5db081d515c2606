//! Tests for rewind configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"

        [continuation]
        stack_size = 1048576
        thread_name = "queens"

        [search]
        fail_on_stale_path = true

        [termination]
        run_count_limit = 500
        minutes_spent_limit = 2
    "#;

    let config = RewindConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.continuation.stack_size, Some(1024 * 1024));
    assert_eq!(config.continuation.thread_name.as_deref(), Some("queens"));
    assert!(config.search.fail_on_stale_path);
    assert_eq!(config.run_count_limit(), Some(500));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(120)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        continuation:
          stack_size: 65536
        termination:
          seconds_spent_limit: 30
    "#;

    let config = RewindConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert!(config.environment_mode.is_asserted());
    assert_eq!(config.continuation.stack_size, Some(65536));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
}

#[test]
fn test_empty_document_is_default() {
    let config = RewindConfig::from_toml_str("").unwrap();
    assert_eq!(config, RewindConfig::default());
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.run_count_limit(), None);
    assert!(!config.environment_mode.is_asserted());
}

#[test]
fn test_builder() {
    let config = RewindConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_stack_size(2 * 1024 * 1024)
        .with_run_count_limit(10)
        .with_termination_seconds(5)
        .with_fail_on_stale_path(true);

    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.continuation.stack_size, Some(2 * 1024 * 1024));
    assert_eq!(config.run_count_limit(), Some(10));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
    assert!(config.search.fail_on_stale_path);
}

#[test]
fn test_zero_stack_size_rejected() {
    let err = RewindConfig::from_toml_str(
        r#"
        [continuation]
        stack_size = 0
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_zero_run_limit_rejected() {
    let err = RewindConfig::from_yaml_str("termination:\n  run_count_limit: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_mode_rejected() {
    let err = RewindConfig::from_toml_str(r#"environment_mode = "sometimes""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = RewindConfig::load("definitely/not/here/rewind.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
