use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "sitegate.toml",
    "config/sitegate.toml",
    "crates/config/sitegate.toml",
    "../sitegate.toml",
    "../config/sitegate.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub router: RouterConfig,
}

/// Where the local key-value records live.
///
/// ```
/// use sitegate_config::StoreConfig;
///
/// let store = StoreConfig::default();
/// assert_eq!(store.url, "sqlite://sitegate.db");
/// assert_eq!(store.max_connections, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "StoreConfig::default_url")]
    pub url: String,
    #[serde(default = "StoreConfig::default_max_connections")]
    pub max_connections: u32,
}

impl StoreConfig {
    fn default_url() -> String {
        "sqlite://sitegate.db".to_string()
    }

    const fn default_max_connections() -> u32 {
        1
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Upper bound on redirects followed for a single navigation.
    #[serde(default = "RouterConfig::default_max_redirects")]
    pub max_redirects: usize,
    /// Number of history entries retained before the oldest are dropped.
    #[serde(default = "RouterConfig::default_history_limit")]
    pub history_limit: usize,
}

impl RouterConfig {
    const fn default_max_redirects() -> usize {
        8
    }

    const fn default_history_limit() -> usize {
        100
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_redirects: Self::default_max_redirects(),
            history_limit: Self::default_history_limit(),
        }
    }
}

fn as_config_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use sitegate_config::load;
///
/// std::env::remove_var("SITEGATE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.store.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("store.url", defaults.store.url.clone())
        .context("invalid default for store.url")?
        .set_default(
            "store.max_connections",
            i64::from(defaults.store.max_connections),
        )
        .context("invalid default for store.max_connections")?
        .set_default(
            "router.max_redirects",
            as_config_int(defaults.router.max_redirects),
        )
        .context("invalid default for router.max_redirects")?
        .set_default(
            "router.history_limit",
            as_config_int(defaults.router.history_limit),
        )
        .context("invalid default for router.history_limit")?;

    let environment_overrides = config::Environment::with_prefix("SITEGATE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("SITEGATE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via SITEGATE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.store.max_connections == 0 {
        config.store.max_connections = 1;
    }

    debug!(?config, "loaded sitegate configuration");
    Ok(config)
}
