//! Test plan for the `sitegate-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use sitegate_config::{load, AppConfig, RouterConfig, StoreConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "SITEGATE_CONFIG",
    "SITEGATE__STORE__URL",
    "SITEGATE__STORE__MAX_CONNECTIONS",
    "SITEGATE__ROUTER__MAX_REDIRECTS",
    "SITEGATE__ROUTER__HISTORY_LIMIT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.store.url, defaults.store.url);
    assert_eq!(config.store.max_connections, defaults.store.max_connections);
    assert_eq!(config.router.max_redirects, defaults.router.max_redirects);
    assert_eq!(config.router.history_limit, defaults.router.history_limit);
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "sitegate.toml",
        r#"
        [router]
        max_redirects = 3
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/sitegate.toml",
        r#"
        [router]
        max_redirects = 5
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.router.max_redirects, 3);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "sitegate.toml",
        r#"
        [store]
        url = "sqlite://data/site.db"
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.store.url, "sqlite://data/site.db");
    assert_eq!(config.store.max_connections, defaults.store.max_connections);
    assert_eq!(config.router.history_limit, defaults.router.history_limit);
}

#[test]
#[serial]
fn load_honours_explicit_config_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [router]
        history_limit = 12
        "#,
    );
    let path = temp_dir.path().join("elsewhere/custom.toml");
    ctx.set_var("SITEGATE_CONFIG", path.display().to_string());

    let config = load().expect("configuration load should read SITEGATE_CONFIG");
    assert_eq!(config.router.history_limit, 12);
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "sitegate.toml",
        r#"
        [router]
        max_redirects = 4
        "#,
    );

    ctx.set_var("SITEGATE__ROUTER__MAX_REDIRECTS", "2");
    ctx.set_var("SITEGATE__STORE__URL", "sqlite://:memory:");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.router.max_redirects, 2);
    assert_eq!(config.store.url, "sqlite://:memory:");
}

#[test]
#[serial]
fn load_raises_zero_connection_pool_to_one() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    ctx.set_var("SITEGATE__STORE__MAX_CONNECTIONS", "0");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.store.max_connections, 1);
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "sitegate.toml",
        r#"
        [router]
        max_redirects = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn router_config_defaults_bound_redirects_and_history() {
    let defaults = RouterConfig::default();
    assert_eq!(defaults.max_redirects, 8);
    assert_eq!(defaults.history_limit, 100);
}

#[test]
fn store_config_defaults_to_single_connection_sqlite_file() {
    let defaults = StoreConfig::default();
    assert_eq!(defaults.url, "sqlite://sitegate.db");
    assert_eq!(defaults.max_connections, 1);
}
