use hub_config::HubConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
backend:
  base_url: "${HUB_BACKEND_URL}"
  timeout_secs: 5
ui:
  poll_interval_ms: 500
  countdown_auto_dismiss_ms: 2500
  "#;
    let p = write_yaml(&tmp, "hub.yaml", file_yaml);

    temp_env::with_var("HUB_BACKEND_URL", Some("http://localhost:9999"), || {
        let config = HubConfigLoader::new()
            .with_file(p.clone())
            .load()
            .expect("load system config");

        assert_eq!(config.backend.base_url, "http://localhost:9999");
        assert_eq!(config.backend.timeout().as_secs(), 5);
        assert_eq!(config.ui.poll_interval().as_millis(), 500);
        assert_eq!(config.ui.auto_dismiss_delay().as_millis(), 2500);
    });
}

#[test]
#[serial]
fn test_missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let absent = tmp.path().join("does-not-exist.yaml");

    let config = HubConfigLoader::new()
        .with_file_optional(absent)
        .load()
        .expect("defaults should satisfy the schema");

    assert_eq!(config.ui.poll_interval_ms, 1000);
    assert!(config.backend.base_url.starts_with("https://"));
}
