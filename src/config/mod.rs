//! Configuration management module
//!
//! Provides comprehensive configuration management with:
//! - TOML-based configuration files
//! - Sensible defaults for every section
//! - Validation on load

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// UI configuration
    pub ui: UIConfig,
    /// Default modal behavior
    pub modal: ModalConfig,
    /// Resource client configuration
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./tui-modal.toml
    /// 2. ~/.config/tui-modal/config.toml
    /// 3. Default configuration
    pub async fn load() -> AppResult<Self> {
        info!("Loading application configuration");

        // Try current directory first
        if let Ok(config) = Self::load_from_file("./tui-modal.toml").await {
            info!("Loaded configuration from ./tui-modal.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_path) = Self::get_user_config_path() {
            if let Ok(config) = Self::load_from_file(&config_path).await {
                info!("Loaded configuration from {}", config_path.display());
                return Ok(config);
            }
        }

        // Use default configuration
        info!("Using default configuration");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Io(e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let path = path.as_ref();
        debug!("Saving configuration to: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Io(e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .await
            .map_err(|e| AppError::Io(e))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> AppResult<()> {
        debug!("Validating configuration");

        // Validate modal defaults
        match self.modal.default_size.as_str() {
            "regular" | "medium" | "large" => {}
            other => {
                return Err(AppError::config(format!(
                    "modal.default_size must be regular, medium or large, got '{}'",
                    other
                )));
            }
        }

        for trigger in &self.modal.close_on {
            match trigger.as_str() {
                "button" | "esc" | "overlay" => {}
                other => {
                    return Err(AppError::config(format!(
                        "modal.close_on entries must be button, esc or overlay, got '{}'",
                        other
                    )));
                }
            }
        }

        // Validate client settings
        if self.client.page_size == 0 {
            return Err(AppError::config("client.page_size must be greater than 0"));
        }

        if self.client.request_timeout_ms == 0 {
            return Err(AppError::config(
                "client.request_timeout_ms must be greater than 0",
            ));
        }

        url::Url::parse(&self.client.base_url)
            .map_err(|e| AppError::config(format!("client.base_url is not a valid URL: {}", e)))?;

        // Validate UI settings
        if self.ui.refresh_rate_ms == 0 {
            return Err(AppError::config("ui.refresh_rate_ms must be greater than 0"));
        }

        debug!("Configuration validation passed");
        Ok(())
    }

    /// Get user configuration directory path
    fn get_user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("tui-modal");
            path.push("config.toml");
            path
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            ui: UIConfig::default(),
            modal: ModalConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name
    pub name: String,
    /// Application version
    pub version: String,
    /// Debug mode
    pub debug: bool,
    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "TUI Modal".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: cfg!(debug_assertions),
            log_level: if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            }
            .to_string(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Theme name
    pub theme: String,
    /// Enable mouse support
    pub enable_mouse: bool,
    /// Refresh rate in milliseconds (for animations)
    pub refresh_rate_ms: u64,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            enable_mouse: true,
            refresh_rate_ms: 100,
        }
    }
}

/// Default modal behavior
///
/// Mirrors the caller-facing modal options so deployments can change the
/// out-of-the-box dialog behavior without touching code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Default window size: regular, medium or large
    pub default_size: String,
    /// Whether dialogs may be dismissed at all
    pub allow_close: bool,
    /// Whether dialogs dim the background by default
    pub has_overlay: bool,
    /// Close triggers honored by default: button, esc, overlay
    pub close_on: Vec<String>,
    /// Whether dialog bodies scroll when content overflows
    pub can_scroll_body: bool,
    /// Whether dialog bodies get inner padding
    pub has_body_padding: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            default_size: "regular".to_string(),
            allow_close: true,
            has_overlay: true,
            close_on: vec!["button".to_string()],
            can_scroll_body: true,
            has_body_padding: true,
        }
    }
}

/// Resource client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the resource service
    pub base_url: String,
    /// Collection path appended to the base URL
    pub resource_path: String,
    /// Page size ceiling for list requests
    pub page_size: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            resource_path: "/api/db/v0/tables/".to_string(),
            page_size: 500,
            request_timeout_ms: 5000,
        }
    }
}
