#![allow(clippy::unwrap_used)]
// File-based config loading and saving.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use skymgr_config::{Config, ConfigError, ListsConfig, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.lists, ListsConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
hypervisor = "http://10.0.0.2:8000"

[lists]
full_page_size = 100
settle_delay_ms = 250
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    let lists = cfg.list_config();

    assert_eq!(cfg.hypervisor_url().unwrap().as_str(), "http://10.0.0.2:8000/");
    assert_eq!(lists.page_sizes.full, 100);
    assert_eq!(lists.page_sizes.short, 5);
    assert_eq!(lists.settle_delay, Duration::from_millis(250));
}

#[test]
fn invalid_file_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[lists]\nshort_page_size = 0\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }), "got: {err:?}");
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        visor: Some("02a1b2".into()),
        timeout: 10,
        ..Config::default()
    };

    save_config_to(&cfg, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, cfg);
}
