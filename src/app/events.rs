//! Application event system
//!
//! Provides async event handling for modal lifecycle notifications and
//! resource client results using tokio channels.

use tokio::sync::mpsc;

use crate::{
    client::ResourceRecord,
    error::{AppError, AppResult},
    modal::LifecycleEvent,
};

/// Event handler for async operations
///
/// Manages background tasks and inter-component communication using
/// tokio channels for high-performance message passing.
pub struct EventHandler {
    /// Sender for application events
    event_sender: mpsc::UnboundedSender<AppEvent>,
    /// Receiver for application events
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub async fn new() -> AppResult<Self> {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Ok(Self {
            event_sender,
            event_receiver,
        })
    }

    /// Send an event to the application
    pub fn send_event(&self, event: AppEvent) -> AppResult<()> {
        self.event_sender
            .send(event)
            .map_err(|_| AppError::state("Failed to send application event"))?;
        Ok(())
    }

    /// Try to receive an event (non-blocking)
    pub async fn try_receive_event(&mut self) -> Option<AppEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Get a cloned sender for background tasks
    pub fn get_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_sender.clone()
    }
}

/// Application events for async communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A modal reported a lifecycle transition
    ModalLifecycle(LifecycleEvent),

    /// The resource collection was fetched
    ResourceListLoaded {
        total_count: u32,
        records: Vec<ResourceRecord>,
    },

    /// Resource operation completed
    ResourceOperationCompleted {
        operation: ResourceOperation,
        result: Result<String, String>,
        duration_ms: u64,
    },

    /// Application error
    Error(String),

    /// Application shutdown requested
    Shutdown,
}

/// Resource operations for event tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOperation {
    List,
    Update(String),
}

impl ResourceOperation {
    /// Get the display name for the operation
    pub fn display_name(&self) -> &str {
        match self {
            ResourceOperation::List => "List Resources",
            ResourceOperation::Update(_) => "Update Resource",
        }
    }
}
