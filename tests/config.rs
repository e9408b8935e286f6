//! Config persistence. Kept to a single test: the config directory comes from
//! a process-wide environment variable.

use std::fs;

use stencil::defaults;
use tempfile::TempDir;

#[test]
fn template_paths_persist_and_reset() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("STENCIL_CONFIG_DIR", dir.path());

    assert!(!defaults::config_exists());
    assert_eq!(defaults::load_defaults(), defaults::builtin_defaults());

    assert!(defaults::add_template_path("~/templates").unwrap());
    assert!(!defaults::add_template_path(" ~/templates ").unwrap());
    assert!(defaults::add_template_path("vendor/templates").unwrap());
    assert!(defaults::config_exists());
    assert_eq!(
        defaults::load_defaults().template_paths,
        vec!["~/templates", "vendor/templates"]
    );

    assert!(defaults::remove_template_path("~/templates").unwrap());
    assert!(!defaults::remove_template_path("~/templates").unwrap());
    assert_eq!(
        defaults::load_defaults().template_paths,
        vec!["vendor/templates"]
    );

    let err = defaults::add_template_path("   ").unwrap_err();
    assert_eq!(err.code.as_str(), "config.invalid_value");

    let path = dir.path().join("stencil.json");
    fs::write(&path, "{ not json").unwrap();
    let err = defaults::load_config_from_file().unwrap_err();
    assert_eq!(err.code.as_str(), "config.invalid_json");
    assert_eq!(defaults::load_defaults(), defaults::builtin_defaults());

    assert!(defaults::reset_config().unwrap());
    assert!(!defaults::reset_config().unwrap());
    assert!(!path.exists());
}
