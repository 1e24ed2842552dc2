//! Loader for tweetmood configuration with YAML + environment overlays.
//!
//! Precedence, lowest first: built-in defaults, the optional YAML file,
//! `TWEETMOOD__`-prefixed environment variables (`TWEETMOOD__SERVER__BIND`),
//! then `${VAR}` expansion over every string value.
//!
//! The Twitter credentials themselves never live here; see [`credentials`].
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tweetmood_common::LogFormat;

pub mod credentials;
mod error;

pub use credentials::{Credentials, load_credentials};
pub use error::StartupError;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetmoodConfig {
    /// Path of the credentials file when it is not given on the command line.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub twitter: TwitterSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory holding `favicon.ico`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterSettings {
    #[serde(default = "default_twitter_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            base_url: default_twitter_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub stderr: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::default(),
            stderr: true,
            filter: default_filter(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_twitter_base_url() -> String {
    "https://api.twitter.com".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "info".into()
}

impl TweetmoodConfig {
    /// Pick the credentials path: the command line wins over the config file.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tweetmood_config::TweetmoodConfig;
    ///
    /// let cfg = TweetmoodConfig {
    ///     credentials_file: Some(PathBuf::from("from-config.csv")),
    ///     ..Default::default()
    /// };
    /// let picked = cfg.credentials_path(Some(PathBuf::from("cli.csv"))).unwrap();
    /// assert_eq!(picked, PathBuf::from("cli.csv"));
    /// ```
    pub fn credentials_path(&self, cli: Option<PathBuf>) -> Result<PathBuf, StartupError> {
        let raw = cli
            .or_else(|| self.credentials_file.clone())
            .ok_or(StartupError::MissingCredentialsArgument)?;
        let expanded = raw
            .to_str()
            .map(|s| PathBuf::from(shellexpand::tilde(s).into_owned()))
            .unwrap_or(raw);
        Ok(expanded)
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

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TweetmoodConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TweetmoodConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetmoodConfigLoader {
    /// Start from defaults. `TWEETMOOD__` env overrides are layered on in
    /// [`Self::load`], above every file.
    ///
    /// ```
    /// use tweetmood_config::TweetmoodConfigLoader;
    ///
    /// let config = TweetmoodConfigLoader::new().load().expect("defaults load");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`Self::with_file`] but silently skipped when the file is absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use tweetmood_config::TweetmoodConfigLoader;
    ///
    /// let cfg = TweetmoodConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// server:
    ///   bind: "0.0.0.0:8080"
    /// twitter:
    ///   timeout_secs: 3
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.server.bind, "0.0.0.0:8080");
    /// assert_eq!(cfg.twitter.timeout_secs, 3);
    /// assert_eq!(cfg.twitter.base_url, "https://api.twitter.com");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    pub fn load(self) -> Result<TweetmoodConfig, StartupError> {
        // Later sources win, so env goes last.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("TWEETMOOD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TweetmoodConfig = serde_json::from_value(v)
            .map_err(|e| StartupError::Config(config::ConfigError::Message(e.to_string())))?;

        tracing::debug!(
            bind = %typed.server.bind,
            base_url = %typed.twitter.base_url,
            "config.loaded"
        );
        Ok(typed)
    }
}
