//! Configuration tests
//!
//! Covers defaults, file round-trips, validation and how the `[modal]`
//! section seeds modal options.

use tui_modal::config::{ClientConfig, Config, ModalConfig};
use tui_modal::{CloseTrigger, ModalOptions, ModalSize};

/// Test configuration defaults
#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.app.name, "TUI Modal");
    assert_eq!(config.ui.theme, "default");
    assert!(config.ui.enable_mouse);

    assert_eq!(config.modal.default_size, "regular");
    assert!(config.modal.allow_close);
    assert!(config.modal.has_overlay);
    assert_eq!(config.modal.close_on, vec!["button".to_string()]);
    assert!(config.modal.can_scroll_body);

    assert_eq!(config.client.page_size, 500);
    assert_eq!(config.client.base_url, "http://localhost:8000");

    println!("✓ Configuration defaults are correct");
}

/// Test that defaults pass validation
#[test]
fn test_default_config_validates() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    println!("✓ Default configuration validates");
}

/// Test saving and reloading a configuration file
#[tokio::test]
async fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.ui.theme = "dark".to_string();
    config.modal.default_size = "large".to_string();
    config.modal.close_on = vec!["button".to_string(), "esc".to_string()];
    config.client.page_size = 100;

    config.save_to_file(&path).await.expect("save");
    let loaded = Config::load_from_file(&path).await.expect("load");

    assert_eq!(loaded.ui.theme, "dark");
    assert_eq!(loaded.modal.default_size, "large");
    assert_eq!(
        loaded.modal.close_on,
        vec!["button".to_string(), "esc".to_string()]
    );
    assert_eq!(loaded.client.page_size, 100);

    println!("✓ Configuration round-trips through a file");
}

/// Test that loading rejects invalid values
#[tokio::test]
async fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.modal.default_size = "enormous".to_string();
    config.save_to_file(&path).await.expect("save");
    assert!(Config::load_from_file(&path).await.is_err());

    let mut config = Config::default();
    config.client.page_size = 0;
    config.save_to_file(&path).await.expect("save");
    assert!(Config::load_from_file(&path).await.is_err());

    let mut config = Config::default();
    config.modal.close_on = vec!["hover".to_string()];
    config.save_to_file(&path).await.expect("save");
    assert!(Config::load_from_file(&path).await.is_err());

    println!("✓ Loading rejects invalid values");
}

/// Test direct validation failures
#[test]
fn test_validation_failures() {
    let mut config = Config::default();
    config.client.base_url = "definitely not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.client.request_timeout_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.ui.refresh_rate_ms = 0;
    assert!(config.validate().is_err());

    println!("✓ Validation rejects bad values");
}

/// Test that the `[modal]` section seeds modal options
#[test]
fn test_modal_options_seeded_from_config() {
    let defaults = ModalConfig {
        default_size: "large".to_string(),
        allow_close: false,
        has_overlay: false,
        close_on: vec!["esc".to_string(), "overlay".to_string()],
        can_scroll_body: false,
        has_body_padding: false,
    };

    let options = ModalOptions::from_defaults(&defaults);
    assert_eq!(options.size, ModalSize::Large);
    assert!(!options.allow_close);
    assert!(!options.has_overlay);
    assert!(!options.close_on.contains(CloseTrigger::Button));
    assert!(options.close_on.contains(CloseTrigger::Esc));
    assert!(options.close_on.contains(CloseTrigger::Overlay));
    assert!(!options.can_scroll_body);

    // Seeding never touches per-dialog identity or visibility
    assert!(options.modal_id.is_none());
    assert!(!options.is_open);

    println!("✓ Modal options are seeded from the config section");
}

/// Test that unknown names in the config fall back to defaults
#[test]
fn test_unknown_config_names_fall_back() {
    let defaults = ModalConfig {
        default_size: "gigantic".to_string(),
        close_on: vec!["button".to_string(), "telepathy".to_string()],
        ..ModalConfig::default()
    };

    let options = ModalOptions::from_defaults(&defaults);
    assert_eq!(options.size, ModalSize::Regular);
    assert!(options.close_on.contains(CloseTrigger::Button));

    println!("✓ Unknown config names fall back to defaults");
}

/// Test client configuration defaults used for request building
#[test]
fn test_client_config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.resource_path, "/api/db/v0/tables/");
    assert_eq!(config.request_timeout_ms, 5000);

    println!("✓ Client configuration defaults are correct");
}
