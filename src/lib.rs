//! TUI Modal - Dismissible modal overlay dialogs for terminal applications
//!
//! This library renders modal dialogs above a ratatui base view, with
//! policy-gated dismissal, deferred lifecycle notifications and a shared
//! overlay anchor for stacking concurrent dialogs.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Presentation Layer**: Window chrome and themes built with ratatui
//! - **Application Layer**: State management and event handling
//! - **Domain Layer**: Modal controllers, dismissal policy, overlay anchor
//! - **Infrastructure Layer**: HTTP resource client and configuration

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod modal;
pub mod ui;

pub use app::App;
pub use error::{AppError, AppResult};
pub use modal::{
    CloseTrigger, CloseTriggerSet, LifecycleEvent, LifecycleKind, ModalController, ModalOptions,
    ModalSize, OverlayAnchor,
};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with structured logging
///
/// Performance requirement: Initialization < 50ms
///
/// # Features
/// - Structured JSON logging in production
/// - Human-readable logs in development
/// - Performance tracing support
/// - Configurable log levels via RUST_LOG environment variable
pub fn initialize_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tui_modal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
