//! Tests for default values.

use senchatools_config::{Settings, WatchSettings, DEFAULT_URL_PATTERN};
use std::path::PathBuf;

#[test]
fn settings_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.project_root, PathBuf::from("."));
    assert!(settings.installed_apps.is_empty());
    assert!(settings.modules.is_empty());
    assert_eq!(settings.static_root, PathBuf::from("static"));
    assert!(settings.document_root.is_none());
    assert_eq!(settings.url_pattern, DEFAULT_URL_PATTERN);
    assert!(!settings.debug_mode);
    assert!(!settings.auto_login);
    assert!(settings.auto_login_user.is_none());
    assert_eq!(settings.sencha_command, "sencha");
    assert!(settings.collectstatic_command.is_none());
    assert!(settings.tool_timeout_secs.is_none());
}

#[test]
fn watch_defaults_include_js_and_skip_build_output() {
    let watch = WatchSettings::default();
    assert_eq!(watch.include, vec!["*.js".to_string()]);
    for pattern in ["*app-all.js", "*all-classes.js", "*.pyc", "*~"] {
        assert!(
            watch.exclude.iter().any(|p| p == pattern),
            "missing default exclude {pattern}"
        );
    }
}

#[test]
fn defaults_pass_validation() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let settings: Settings = toml::from_str(
        r#"
debug_mode = true

[watch]
include = ["*.html"]
"#,
    )
    .unwrap();

    assert!(settings.debug_mode);
    assert_eq!(settings.watch.include, vec!["*.html".to_string()]);
    assert_eq!(settings.watch.exclude, WatchSettings::default().exclude);
    assert_eq!(settings.sencha_command, "sencha");
}

#[test]
fn settings_serialize_with_snake_case_keys() {
    let value = serde_json::to_value(Settings::default()).unwrap();
    assert!(value.get("url_pattern").is_some());
    assert!(value.get("static_root").is_some());
    assert!(value["watch"].get("exclude").is_some());
}
