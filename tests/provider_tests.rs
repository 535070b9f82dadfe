//! Resolver facade behavior: custom layer, parent links, degraded
//! construction, and diagnostics.

use propstack::{
    ClassScope, ConfigError, ConfigProvider, Environment, OsFamily, PropertyLayer,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("propstack=debug")
        .try_init();
}

#[test]
fn custom_class_properties_visible_without_rebuilding() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "timeout=30");

    let config = ConfigProvider::builder(temp.path()).build();
    assert_eq!(config.get("browser"), None);

    config.load_custom_class_properties(&[("browser", "firefox")].into_iter().collect());
    assert_eq!(config.get("browser").as_deref(), Some("firefox"));

    // Repeated merges override and add, never remove.
    config.load_custom_class_properties(&[("browser", "chrome"), ("headless", "true")]
        .into_iter()
        .collect());
    assert_eq!(config.get("browser").as_deref(), Some("chrome"));
    assert_eq!(config.get("headless").as_deref(), Some("true"));
}

#[test]
fn custom_class_overrides_file_layers_but_not_harness_params() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "k=global");
    write(temp.path(), "qa/env.properties", "k=env");

    let config = ConfigProvider::builder(temp.path())
        .environment(Environment::new("qa"))
        .test_params([("k", "params")].into_iter().collect())
        .build();

    config.load_custom_class_properties(&[("k", "custom")].into_iter().collect());
    assert_eq!(config.get("k").as_deref(), Some("params"));

    let without_params = ConfigProvider::builder(temp.path())
        .environment(Environment::new("qa"))
        .build();
    without_params.load_custom_class_properties(&[("k", "custom")].into_iter().collect());
    assert_eq!(without_params.get("k").as_deref(), Some("custom"));
}

#[test]
fn parent_answer_wins_unconditionally() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "parent/global/defaults.properties", "timeout=99\nparent_only=yes");
    write(temp.path(), "child/global/defaults.properties", "timeout=30");

    let parent = ConfigProvider::builder(temp.path().join("parent")).build();
    let child = ConfigProvider::builder(temp.path().join("child"))
        .parent(&parent)
        .build();

    assert_eq!(child.get("timeout").as_deref(), Some("99"));
    assert_eq!(child.get("parent_only").as_deref(), Some("yes"));
    assert!(child.contains("parent_only"));
}

#[test]
fn dropped_parent_is_treated_as_absent() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "parent/global/defaults.properties", "timeout=99");
    write(temp.path(), "child/global/defaults.properties", "timeout=30");

    let parent = ConfigProvider::builder(temp.path().join("parent")).build();
    let child = ConfigProvider::builder(temp.path().join("child"))
        .parent(&parent)
        .build();
    assert_eq!(child.get("timeout").as_deref(), Some("99"));

    drop(parent);

    // The weak link no longer upgrades; lookups fall through to the
    // child's own chain instead of failing.
    assert_eq!(child.get("timeout").as_deref(), Some("30"));
    assert!(!child.contains("parent_only"));
}

#[test]
fn resolver_with_no_layers_and_no_parent_returns_defaults() {
    init_tracing();
    let temp = TempDir::new().unwrap();

    let config = ConfigProvider::builder(temp.path().join("missing")).build();

    assert_eq!(config.get("anything"), None);
    assert_eq!(config.get_or("anything", "fallback"), "fallback");
    assert!(!config.contains("anything"));
    assert!(config.keys().is_empty());
    assert!(matches!(
        config.init_errors(),
        [ConfigError::MissingBaseDirectory { .. }]
    ));
}

#[test]
fn missing_environment_directory_degrades_to_global() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "timeout=30");

    let config = ConfigProvider::builder(temp.path())
        .environment(Environment::new("qa"))
        .build();

    assert_eq!(config.get("timeout").as_deref(), Some("30"));
    assert!(config.init_errors().iter().any(|err| matches!(
        err,
        ConfigError::MissingEnvironmentDirectory { code, .. } if code == "qa"
    )));
}

#[test]
fn contains_agrees_with_get_on_a_sentinel() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "present=1");

    let config = ConfigProvider::builder(temp.path()).build();
    let sentinel = "\u{0}sentinel\u{0}";

    for key in ["present", "absent"] {
        assert_eq!(config.contains(key), config.get_or(key, sentinel) != sentinel);
    }
}

#[test]
fn keys_enumerates_every_loaded_layer() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "a=1");
    write(temp.path(), "qa/env.properties", "b=2");
    write(temp.path(), "qa/class/StepTest.properties", "c=3");

    let config = ConfigProvider::builder(temp.path())
        .environment(Environment::new("qa"))
        .class_scope(ClassScope::new("StepTest"))
        .test_params([("d", "4")].into_iter().collect())
        .build();
    config.load_custom_class_properties(&[("e", "5")].into_iter().collect());

    let keys = config.keys();
    for key in ["a", "b", "c", "d", "e"] {
        assert!(keys.contains(key), "missing key {key}");
    }
}

#[test]
fn accessors_expose_construction_identity() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "a=1");

    let params: PropertyLayer = [("suite", "smoke")].into_iter().collect();
    let config = ConfigProvider::builder(temp.path())
        .environment(Environment::with_locale("qa", "de_CH".parse().unwrap()))
        .class_scope(ClassScope::new("LoginTest"))
        .os_family(OsFamily::Mac)
        .test_params(params.clone())
        .build();

    assert_eq!(config.root(), temp.path());
    assert_eq!(config.environment().unwrap().code(), "qa");
    assert_eq!(config.environment().unwrap().locale().unwrap().to_string(), "de_CH");
    assert_eq!(config.class_scope().unwrap().name(), "LoginTest");
    assert_eq!(config.os_family(), Some(OsFamily::Mac));
    assert_eq!(config.test_params(), Some(&params));
}

#[test]
fn log_available_properties_is_observational() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), "global/defaults.properties", "timeout=30");

    let config = ConfigProvider::builder(temp.path())
        .test_params([("suite", "smoke")].into_iter().collect())
        .build();
    config.load_custom_class_properties(&[("browser", "firefox")].into_iter().collect());

    config.log_available_properties();

    // Resolution is unchanged afterwards.
    assert_eq!(config.get("timeout").as_deref(), Some("30"));
    assert_eq!(config.get("suite").as_deref(), Some("smoke"));
    assert_eq!(config.get("browser").as_deref(), Some("firefox"));
}
