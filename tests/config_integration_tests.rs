//! Integration tests for tool settings
//!
//! These tests verify:
//! - Settings files written by hand are loaded
//! - Environment overrides layer on top of the file
//! - Loaded settings change how arguments resolve

use camino::Utf8PathBuf;
use config::Map;
use pgnopts::{ArgsError, ArgumentResolver, ConfigManager, Registry, RunConfig, ToolSettings};
use std::fs;
use tempfile::TempDir;

/// Helper to create a temporary settings directory
fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_dir)
}

fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_hand_written_settings_file() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    fs::write(
        config_dir.join("pgnopts.yaml"),
        "log_level: info\nlog_json: true\nmax_include_depth: 3\n",
    )
    .unwrap();

    let settings = ConfigManager::new(&config_dir)
        .load_settings_with_env(Map::new())
        .unwrap();

    assert_eq!(settings.log_level, "info");
    assert!(settings.log_json);
    assert_eq!(settings.max_include_depth, 3);
    assert_eq!(settings.log_dir, None);
}

#[test]
fn test_environment_layers_over_file() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = ConfigManager::new(&config_dir);
    manager
        .save_settings(&ToolSettings {
            log_level: "info".to_string(),
            ..ToolSettings::default()
        })
        .unwrap();

    let settings = manager
        .load_settings_with_env(env(&[
            ("PGNOPTS_LOG_LEVEL", "debug"),
            ("ECO_FILE", "/opt/eco/eco.pgn"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

    assert_eq!(settings.log_level, "debug");
    assert_eq!(
        settings.eco_file.as_deref().map(|p| p.as_str()),
        Some("/opt/eco/eco.pgn")
    );
}

#[test]
fn test_eco_file_setting_used_by_bare_e() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let settings = ConfigManager::new(&config_dir)
        .load_settings_with_env(env(&[("ECO_FILE", "/opt/eco/eco.pgn")]))
        .unwrap();

    let mut config = RunConfig::default();
    let mut registry = Registry::new();
    ArgumentResolver::new(&mut config, &mut registry, &settings)
        .resolve_command_line(&["-e"])
        .unwrap();

    assert_eq!(config.eco_file.as_str(), "/opt/eco/eco.pgn");
    assert_eq!(registry.eco_tables.len(), 1);

    // An explicit file wins over the setting.
    let mut config = RunConfig::default();
    let mut registry = Registry::new();
    ArgumentResolver::new(&mut config, &mut registry, &settings)
        .resolve_command_line(&["-elocal.pgn"])
        .unwrap();
    assert_eq!(config.eco_file.as_str(), "local.pgn");
}

#[test]
fn test_include_depth_setting_limits_nesting() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    fs::write(config_dir.join("pgnopts.yaml"), "max_include_depth: 1\n").unwrap();
    let settings = ConfigManager::new(&config_dir)
        .load_settings_with_env(Map::new())
        .unwrap();

    let inner = config_dir.join("inner.txt");
    let outer = config_dir.join("outer.txt");
    fs::write(&inner, ":games.pgn\n").unwrap();
    fs::write(&outer, format!(":-A{}\n", inner)).unwrap();

    let mut config = RunConfig::default();
    let mut registry = Registry::new();
    let err = ArgumentResolver::new(&mut config, &mut registry, &settings)
        .resolve_command_line(&[format!("-A{}", outer)])
        .unwrap_err();

    assert!(matches!(err, ArgsError::IncludeTooDeep { limit: 1, .. }));
    assert!(registry.sources.is_empty());
}

#[test]
fn test_malformed_settings_file() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    fs::write(config_dir.join("pgnopts.yaml"), "max_include_depth: [deep\n").unwrap();

    let result = ConfigManager::new(&config_dir).load_settings_with_env(Map::new());
    assert!(result.is_err());
}
