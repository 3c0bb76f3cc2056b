//! Loader for workspace configuration with YAML + environment overlays.
//!
//! `hub.yaml` carries the backend endpoint and UI timing knobs; every value
//! can be overridden through `HUB_`-prefixed environment variables, and
//! string values support `${VAR}` expansion before deserialisation.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct HubConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the remote coupon service lives and how patient we are with it.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// UI timing knobs. The defaults match the original service contract:
/// eligibility is polled once a second and the countdown overlay folds away
/// after five seconds unless the user closes it first.
#[derive(Debug, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_auto_dismiss_ms")]
    pub countdown_auto_dismiss_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            countdown_auto_dismiss_ms: default_auto_dismiss_ms(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn auto_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.countdown_auto_dismiss_ms)
    }
}

fn default_base_url() -> String {
    "https://coupon-system-backend-aepb.onrender.com".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_auto_dismiss_ms() -> u64 {
    5000
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct HubConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HubConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HubConfigLoader {
    /// Start with sensible defaults: YAML file + `HUB_` env overrides.
    ///
    /// ```
    /// use hub_config::HubConfigLoader;
    ///
    /// let config = HubConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.ui.poll_interval_ms, 1000);
    /// assert_eq!(config.ui.countdown_auto_dismiss_ms, 5000);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("HUB").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent; defaults and env cover the rest.
    pub fn with_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use hub_config::HubConfigLoader;
    ///
    /// let cfg = HubConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// backend:
    ///   base_url: "http://localhost:4000"
    /// ui:
    ///   poll_interval_ms: 250
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.backend.base_url, "http://localhost:4000");
    /// assert_eq!(cfg.ui.poll_interval_ms, 250);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config. `${VAR}` placeholders are expanded first.
    pub fn load(self) -> Result<HubConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: HubConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("HOST", Some("backend")), ("PORT", Some("4000"))], || {
            let mut v = json!([
                "http://$HOST",
                { "addr": "${HOST}:${PORT}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["http://backend", { "addr": "backend:4000" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            // Only termination matters here; the depth cap breaks the cycle.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn defaults_cover_missing_sections() {
        let cfg = HubConfigLoader::new().with_yaml_str("version: '1'").load().unwrap();
        assert_eq!(cfg.backend.timeout_secs, 15);
        assert_eq!(cfg.ui.auto_dismiss_delay().as_millis(), 5000);
    }
}
