//! Application state management
//!
//! Centralized state management for the demo shell following the single
//! source of truth principle.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::ResourceRecord;

/// Central application state
///
/// Manages all demo application state including:
/// - Application lifecycle
/// - Terminal/UI state
/// - Fetched resource records
/// - Error states and notifications
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application lifecycle state
    pub app_state: AppLifecycleState,

    /// UI state
    pub ui_state: UIState,

    /// Fetched resource collection state
    pub resource_state: ResourceState,

    /// Error and notification state
    pub notification_state: NotificationState,
}

impl AppState {
    /// Create a new application state
    pub fn new() -> Self {
        Self {
            app_state: AppLifecycleState::default(),
            ui_state: UIState::default(),
            resource_state: ResourceState::default(),
            notification_state: NotificationState::default(),
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        matches!(self.app_state.lifecycle, LifecyclePhase::Quitting)
    }

    /// Set the quit flag
    pub fn set_should_quit(&mut self, should_quit: bool) {
        if should_quit {
            self.app_state.lifecycle = LifecyclePhase::Quitting;
            self.app_state.quit_requested_at = Some(Utc::now());
        }
    }

    /// Replace the fetched resource collection
    pub fn update_resources(&mut self, total_count: u32, records: Vec<ResourceRecord>) {
        self.resource_state.total_count = Some(total_count);
        self.resource_state.records = records;
        self.resource_state.last_fetch = Some(Utc::now());
    }

    /// Add an error to the notification system
    pub fn add_error(&mut self, error: String) {
        self.notification_state.errors.push(ErrorNotification {
            id: Uuid::new_v4(),
            message: error,
            timestamp: Utc::now(),
            acknowledged: false,
        });
    }

    /// Add an informational message to the notification system
    pub fn add_info(&mut self, message: String) {
        self.notification_state
            .info_messages
            .push(InfoNotification {
                id: Uuid::new_v4(),
                message,
                timestamp: Utc::now(),
                acknowledged: false,
            });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Application lifecycle state
#[derive(Debug, Clone)]
pub struct AppLifecycleState {
    pub lifecycle: LifecyclePhase,
    pub started_at: DateTime<Utc>,
    pub quit_requested_at: Option<DateTime<Utc>>,
}

impl Default for AppLifecycleState {
    fn default() -> Self {
        Self {
            lifecycle: LifecyclePhase::Starting,
            started_at: Utc::now(),
            quit_requested_at: None,
        }
    }
}

/// Application lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Starting,
    Running,
    Quitting,
}

/// UI state management
#[derive(Debug, Clone)]
pub struct UIState {
    pub terminal_size: (u16, u16),
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
        }
    }
}

/// Fetched resource collection state
#[derive(Debug, Clone)]
pub struct ResourceState {
    pub records: Vec<ResourceRecord>,
    pub total_count: Option<u32>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Default for ResourceState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total_count: None,
            last_fetch: None,
        }
    }
}

/// Notification state for errors and messages
#[derive(Debug, Clone)]
pub struct NotificationState {
    pub errors: Vec<ErrorNotification>,
    pub info_messages: Vec<InfoNotification>,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            info_messages: Vec::new(),
        }
    }
}

/// Error notification
#[derive(Debug, Clone)]
pub struct ErrorNotification {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

/// Info notification
#[derive(Debug, Clone)]
pub struct InfoNotification {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}
