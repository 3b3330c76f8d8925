//! Settings loader: built-in defaults, an optional YAML file, and `HDOCK_`
//! environment overrides, layered in that order.
//!
//! ```yaml
//! http:
//!   user_agent: "Mozilla/5.0 Chrome/126"
//!   timeout_secs: 20
//! compile:
//!   pause_ms: 1000
//!   sheet_name: "Summary"
//! ```
//!
//! Environment keys use `__` between sections, e.g. `HDOCK_HTTP__TIMEOUT_SECS=30`.
//! String values may reference other variables as `${VAR}`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 Chrome/126";
pub const DEFAULT_SHEET_NAME: &str = "Summary";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HdockConfig {
    pub http: HttpSettings,
    pub compile: CompileSettings,
}

/// Request identity and time bounds for every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 20,
            connect_timeout_secs: 5,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileSettings {
    /// Politeness delay after every job.
    pub pause_ms: u64,
    pub sheet_name: String,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            pause_ms: 1000,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl CompileSettings {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
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

/// Builder over the `config` crate wiring.
pub struct HdockConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HdockConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HdockConfigLoader {
    /// Defaults only; `HDOCK_` variables are layered on at [`load`](Self::load).
    ///
    /// ```
    /// use hdock_config::HdockConfigLoader;
    ///
    /// let cfg = HdockConfigLoader::new()
    ///     .with_yaml_str("compile:\n  pause_ms: 250")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.compile.pause_ms, 250);
    /// assert_eq!(cfg.compile.sheet_name, "Summary");
    /// assert_eq!(cfg.http.timeout_secs, 20);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a settings file that must exist; format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a settings file that is read only if present.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests and doc examples).
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources and deserialize into [`HdockConfig`].
    ///
    /// ```
    /// use hdock_config::HdockConfigLoader;
    ///
    /// unsafe { std::env::set_var("HDOCK_DOC_AGENT", "docbot/1.0"); }
    ///
    /// let cfg = HdockConfigLoader::new()
    ///     .with_yaml_str("http:\n  user_agent: \"${HDOCK_DOC_AGENT}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(cfg.http.user_agent, "docbot/1.0");
    ///
    /// unsafe { std::env::remove_var("HDOCK_DOC_AGENT"); }
    /// ```
    pub fn load(self) -> Result<HdockConfig, ConfigError> {
        // Environment goes last so it overrides every file.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("HDOCK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
