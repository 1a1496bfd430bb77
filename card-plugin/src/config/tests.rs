//! Config tests.

use std::env;
use std::fs;

use serial_test::serial;

use crate::config::{AppConfig, PluginConfig, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS};
use crate::site::SiteEntry;

fn clear_env() {
    for key in [
        "CARD_CONFIG_PATH",
        "LOG_FILE",
        "GEWE_TIMEOUT_SECS",
        "GEWE_BASE_URL",
        "GEWE_TOKEN",
        "GEWE_APP_ID",
    ] {
        env::remove_var(key);
    }
}

#[test]
fn test_load_or_init_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plugins/card/config.json");

    let config = PluginConfig::load_or_init(&path).unwrap();

    assert_eq!(config, PluginConfig::default_config());
    assert_eq!(config.api.token, "gewechat_token");
    assert_eq!(config.api.base_url, "gewechat_base_url");
    assert_eq!(config.api.app_id, "gewechat_app_id");
    assert_eq!(config.sites.len(), 5);

    let written = fs::read_to_string(&path).unwrap();
    // Non-ASCII names are written verbatim with 4-space indentation.
    assert!(written.contains("\n        \"b站\": \"https://www.bilibili.com\""));
    assert!(written.starts_with("{\n    \"api\": {"));
    assert_eq!(PluginConfig::from_json(&written).unwrap(), config);
}

#[test]
fn test_load_or_init_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "api": {"token": "tk", "base_url": "http://127.0.0.1:2531/v2/api", "app_id": "wx_1"},
            "sites": {
                "github": "https://github.com",
                "docs": {"url": "https://docs.rs", "title": "Docs"}
            }
        }"#,
    )
    .unwrap();

    let config = PluginConfig::load_or_init(&path).unwrap();

    assert_eq!(config.api.token, "tk");
    assert_eq!(config.api.base_url, "http://127.0.0.1:2531/v2/api");
    let names: Vec<&str> = config.sites.names().collect();
    assert_eq!(names, vec!["github", "docs"]);
    assert!(matches!(config.sites.get("docs"), Some(SiteEntry::Full(_))));
}

#[test]
fn test_missing_sections_default_to_empty() {
    let config = PluginConfig::from_json("{}").unwrap();
    assert!(config.sites.is_empty());
    assert!(config.api.token.is_empty());
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(PluginConfig::from_json("{ not json").is_err());
    // A structured site entry must carry a url.
    assert!(PluginConfig::from_json(r#"{"sites": {"x": {"title": "no url"}}}"#).is_err());
}

#[test]
fn test_credentials_debug_masks_token() {
    let mut config = PluginConfig::default_config();
    config.api.token = "0123456789abcdefghij".to_string();
    let debug = format!("{:?}", config.api);
    assert!(debug.contains("0123456***ghij"));
    assert!(!debug.contains("0123456789abcdefghij"));
}

#[test]
#[serial]
fn test_app_config_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig::load(Some(path.clone())).unwrap();

    assert_eq!(config.config_path, path);
    assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.timeout().as_secs(), 30);
    assert!(path.exists());
    // Placeholder base URL is rejected until the user edits the file.
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_app_config_env_overrides() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    env::set_var("CARD_CONFIG_PATH", path.to_str().unwrap());
    env::set_var("LOG_FILE", "/tmp/card.log");
    env::set_var("GEWE_TIMEOUT_SECS", "5");
    env::set_var("GEWE_BASE_URL", "http://127.0.0.1:2531/v2/api");
    env::set_var("GEWE_TOKEN", "env_token");
    env::set_var("GEWE_APP_ID", "env_app");

    let config = AppConfig::load(None).unwrap();

    assert_eq!(config.config_path, path);
    assert_eq!(config.log_file, "/tmp/card.log");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.credentials().base_url, "http://127.0.0.1:2531/v2/api");
    assert_eq!(config.credentials().token, "env_token");
    assert_eq!(config.credentials().app_id, "env_app");
    assert_eq!(config.sites().len(), 5);
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_app_config_rejects_bad_timeout() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    env::set_var("GEWE_TIMEOUT_SECS", "soon");
    assert!(AppConfig::load(Some(path.clone())).is_err());

    env::set_var("GEWE_TIMEOUT_SECS", "0");
    env::set_var("GEWE_BASE_URL", "http://127.0.0.1:2531");
    let config = AppConfig::load(Some(path)).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}
