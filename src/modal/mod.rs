//! Dismissible modal overlay system
//!
//! The modal is built from four pieces with a single direction of
//! composition:
//! - [`ModalController`] owns the open/closed state machine, gates
//!   dismissal requests through policy and schedules lifecycle
//!   notifications for after the frame has been drawn.
//! - [`WindowChrome`] renders the dialog chrome (title bar, close
//!   affordance, body, footer) with no state of its own.
//! - [`OverlayAnchor`] is the shared out-of-flow mount point open modals
//!   attach to, in insertion order.
//! - [`ModalOptions`] is the caller-facing configuration the controller
//!   derives its dismissal permissions from.

use chrono::{DateTime, Utc};

pub mod anchor;
pub mod controller;
pub mod options;
pub mod window;

pub use anchor::{MountGuard, MountKey, OverlayAnchor};
pub use controller::ModalController;
pub use options::{ClosePolicy, CloseTrigger, CloseTriggerSet, ModalOptions, ModalSize};
pub use window::{WindowChrome, WindowRegions};

/// Direction of a visibility transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    /// The modal became visible.
    Opened,
    /// The modal was removed from view.
    Closed,
}

impl LifecycleKind {
    /// Convert to string for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleKind::Opened => "opened",
            LifecycleKind::Closed => "closed",
        }
    }
}

/// Notification emitted once per visibility transition, delivered only
/// after the frame reflecting the new state has been drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Which way the modal transitioned
    pub kind: LifecycleKind,
    /// Correlation token of the controller that transitioned
    pub modal_id: Option<String>,
    /// When the transition was observed
    pub at: DateTime<Utc>,
}

impl LifecycleEvent {
    /// Record an open transition
    pub fn opened(modal_id: Option<String>) -> Self {
        Self {
            kind: LifecycleKind::Opened,
            modal_id,
            at: Utc::now(),
        }
    }

    /// Record a close transition
    pub fn closed(modal_id: Option<String>) -> Self {
        Self {
            kind: LifecycleKind::Closed,
            modal_id,
            at: Utc::now(),
        }
    }
}
