//! Tests for settings discovery and loading.

use senchatools_config::{ConfigDiscovery, ConfigError, CONFIG_FILE_NAME};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn loads_defaults_without_a_file() {
    let dir = TempDir::new().unwrap();
    let settings = ConfigDiscovery::new(dir.path()).load().unwrap();

    assert_eq!(settings.project_root, dir.path().to_path_buf());
    assert_eq!(settings.static_root, dir.path().join("static"));
    assert_eq!(settings.sencha_command, "sencha");
}

#[test]
fn discovers_senchatools_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
installed_apps = ["django.contrib.admin", "shop.calendar"]
static_root = "build/static"
debug_mode = true
auto_login_user = "builder"

[modules]
legacy = "vendor/legacy"
"#,
    )
    .unwrap();

    let settings = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(
        settings.installed_apps,
        vec!["django.contrib.admin".to_string(), "shop.calendar".to_string()]
    );
    assert_eq!(settings.static_root, dir.path().join("build/static"));
    assert_eq!(settings.modules["legacy"], dir.path().join("vendor/legacy"));
    assert!(settings.debug_mode);
    assert_eq!(settings.auto_login_user.as_deref(), Some("builder"));
}

#[test]
fn explicit_file_resolves_relative_to_its_directory() {
    let dir = TempDir::new().unwrap();
    let conf_dir = dir.path().join("conf");
    fs::create_dir(&conf_dir).unwrap();
    let file = conf_dir.join("build.toml");
    fs::write(&file, "static_root = \"../collected\"\n").unwrap();

    let settings = ConfigDiscovery::new(dir.path())
        .with_file(&file)
        .load()
        .unwrap();
    assert_eq!(settings.static_root, dir.path().join("collected"));
}

#[test]
fn invalid_toml_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "debug_mode = [").unwrap();

    let result = ConfigDiscovery::new(dir.path()).load();
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn invalid_values_fail_validation_on_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "url_pattern = \"http://localhost:15041/\"\n",
    )
    .unwrap();

    let result = ConfigDiscovery::new(dir.path()).load();
    match result {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "url_pattern"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn absolute_document_root_is_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "document_root = \"/srv/www\"\n",
    )
    .unwrap();

    let settings = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(settings.document_root, Some(PathBuf::from("/srv/www")));
}
