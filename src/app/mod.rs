//! Application core module
//!
//! Contains the main application logic, state management, and event handling system.
//! Performance requirement: Application initialization < 500ms

pub mod events;
pub mod state;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Text},
    Terminal,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::{
    client::{ResourceApi, ResourceClient, ResourceUpdate},
    config::Config,
    error::{AppError, AppResult},
    modal::{
        CloseTrigger, CloseTriggerSet, LifecycleEvent, ModalController, ModalOptions, ModalSize,
        OverlayAnchor,
    },
    ui::UI,
};
use events::{AppEvent, EventHandler, ResourceOperation};
use state::AppState;

/// Main application struct
///
/// Manages the entire application lifecycle including:
/// - Terminal setup and cleanup
/// - Event handling and state management
/// - Modal controllers mounted at the shared overlay anchor
/// - Resource client integration
/// - Performance monitoring
pub struct App {
    /// Application state
    state: AppState,
    /// Event handler for async operations
    event_handler: EventHandler,
    /// Client for the remote resource collection
    resource_client: Arc<ResourceClient>,
    /// UI renderer
    ui: UI,
    /// Application configuration
    config: Config,
    /// Shared mount point for open modals
    anchor: OverlayAnchor,
    /// Settings dialog, toggled with '1'
    settings_modal: ModalController,
    /// Record details dialog, toggled with '2'
    details_modal: ModalController,
    /// Lifecycle notifications drained from the controllers
    lifecycle_rx: mpsc::UnboundedReceiver<LifecycleEvent>,
    /// Performance metrics
    startup_time: Duration,
}

impl App {
    /// Create a new application instance
    ///
    /// Performance requirement: < 500ms initialization time
    pub async fn new() -> AppResult<Self> {
        let init_start = Instant::now();

        info!("Initializing TUI Modal application");

        // Load configuration - target: < 50ms
        let config_start = Instant::now();
        let config = Config::load().await?;
        debug!("Configuration loaded in {:?}", config_start.elapsed());

        // Initialize resource client - target: < 50ms
        let client_start = Instant::now();
        let resource_client = Arc::new(ResourceClient::new(config.client.clone())?);
        debug!(
            "Resource client initialized in {:?}",
            client_start.elapsed()
        );

        // Initialize application state - target: < 50ms
        let state_start = Instant::now();
        let state = AppState::new();
        debug!(
            "Application state initialized in {:?}",
            state_start.elapsed()
        );

        // Initialize event handler - target: < 50ms
        let event_start = Instant::now();
        let event_handler = EventHandler::new().await?;
        debug!("Event handler initialized in {:?}", event_start.elapsed());

        // Initialize UI - target: < 100ms
        let ui_start = Instant::now();
        let ui = UI::new(&config.ui);
        debug!("UI initialized in {:?}", ui_start.elapsed());

        // Initialize modal controllers - target: < 50ms
        let modal_start = Instant::now();
        let anchor = OverlayAnchor::new();
        let (lifecycle_tx, lifecycle_rx) = mpsc::unbounded_channel();

        let mut settings_modal = ModalController::new(
            ModalOptions::from_defaults(&config.modal)
                .modal_id("settings")
                .title("Settings")
                .size(ModalSize::Medium)
                .close_on(CloseTriggerSet::from_triggers(&[
                    CloseTrigger::Button,
                    CloseTrigger::Esc,
                ])),
            anchor.clone(),
        );
        settings_modal.set_lifecycle_sender(lifecycle_tx.clone());
        settings_modal.set_body(settings_body(&config));
        settings_modal.set_footer(Text::from("Esc or ✕ closes this dialog"));

        let mut details_modal = ModalController::new(
            ModalOptions::from_defaults(&config.modal)
                .modal_id("record-details")
                .title("Record Details")
                .size(ModalSize::Regular)
                .close_on(CloseTriggerSet::from_triggers(&[
                    CloseTrigger::Button,
                    CloseTrigger::Esc,
                    CloseTrigger::Overlay,
                ])),
            anchor.clone(),
        );
        details_modal.set_lifecycle_sender(lifecycle_tx);
        details_modal.set_footer(Text::from("Esc, ✕ or a click outside closes this dialog"));
        debug!(
            "Modal controllers initialized in {:?}",
            modal_start.elapsed()
        );

        let startup_time = init_start.elapsed();

        // Performance validation
        if startup_time > Duration::from_millis(500) {
            warn!(
                "Application initialization exceeded 500ms target: {:?}",
                startup_time
            );
        } else {
            debug!("Application initialized successfully in {:?}", startup_time);
        }

        Ok(Self {
            state,
            event_handler,
            resource_client,
            ui,
            config,
            anchor,
            settings_modal,
            details_modal,
            lifecycle_rx,
            startup_time,
        })
    }

    /// Run the main application loop
    ///
    /// Sets up the terminal, handles events, and manages the UI rendering loop.
    pub async fn run(mut self) -> AppResult<()> {
        info!("Starting application main loop");

        // Setup terminal
        self.setup_terminal()?;

        let result = self.main_loop().await;

        // Cleanup terminal
        self.cleanup_terminal()?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> AppResult<()> {
        enable_raw_mode().map_err(|e| {
            warn!("Failed to enable raw mode: {}. Running in limited mode.", e);
            AppError::Io(e)
        })?;
        let mut stdout = std::io::stdout();
        if self.config.ui.enable_mouse {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        } else {
            execute!(stdout, EnterAlternateScreen)
        }
        .map_err(|e| {
            warn!("Failed to setup terminal: {}. Running in limited mode.", e);
            AppError::Io(e)
        })?;
        Ok(())
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal(&self) -> AppResult<()> {
        disable_raw_mode()?;
        let mut stdout = std::io::stdout();
        if self.config.ui.enable_mouse {
            execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        } else {
            execute!(stdout, LeaveAlternateScreen)?;
        }
        Ok(())
    }

    /// Main application event loop
    async fn main_loop(&mut self) -> AppResult<()> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal = Terminal::new(backend)?;

        info!("Entering main application loop");
        self.state.app_state.lifecycle = state::LifecyclePhase::Running;

        loop {
            // Render UI - target: < 16ms for 60fps
            let render_start = Instant::now();
            let details_on_top = self.details_on_top();
            terminal.draw(|f| {
                self.ui.render(f, &self.state);

                // Modals draw after the base view, in anchor stacking order
                let screen = f.size();
                let (bottom, top) = if details_on_top {
                    (&mut self.settings_modal, &mut self.details_modal)
                } else {
                    (&mut self.details_modal, &mut self.settings_modal)
                };
                bottom.render(f, screen, self.ui.theme());
                top.render(f, screen, self.ui.theme());
            })?;

            let render_time = render_start.elapsed();
            if render_time > Duration::from_millis(16) {
                debug!("Render time exceeded 16ms target: {:?}", render_time);
            }

            // The frame is on screen; let the controllers release any
            // lifecycle notifications queued by transitions it reflects
            self.flush_lifecycle();

            // Handle events with timeout for responsiveness
            if let Ok(has_event) = timeout(Duration::from_millis(100), self.handle_events()).await {
                has_event?;
            }

            // Check if application should quit
            if self.state.should_quit() {
                info!("Application quit requested");
                break;
            }

            // Process pending tasks
            self.process_background_tasks().await?;

            // Small delay to prevent busy waiting
            sleep(Duration::from_millis(1)).await;
        }

        Ok(())
    }

    /// Settle point reached after `Terminal::draw` returns
    fn flush_lifecycle(&mut self) {
        self.settings_modal.after_render();
        self.details_modal.after_render();
    }

    /// Handle input events
    async fn handle_events(&mut self) -> AppResult<bool> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match event::read()? {
            Event::Key(key) => {
                self.handle_key_event(key)?;
            }
            Event::Mouse(mouse) => {
                self.handle_mouse_event(mouse)?;
            }
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                self.state.ui_state.terminal_size = (width, height);
                self.ui.handle_resize(width, height);
            }
            _ => {}
        }

        Ok(true)
    }

    /// Route a key event
    ///
    /// Escape goes to every modal so each can apply its own dismissal
    /// policy; it only quits the application when no modal is open.
    /// Scroll keys go to the topmost open modal.
    fn handle_key_event(&mut self, key: KeyEvent) -> AppResult<()> {
        match key.code {
            KeyCode::Esc => {
                let settings_consumed = self.settings_modal.handle_key(key)?;
                let details_consumed = self.details_modal.handle_key(key)?;
                let any_open = self.settings_modal.is_open() || self.details_modal.is_open();
                if !settings_consumed && !details_consumed && !any_open {
                    self.state.set_should_quit(true);
                    info!("Quit requested by user");
                }
            }
            KeyCode::Char('q') => {
                self.state.set_should_quit(true);
                info!("Quit requested by user");
            }
            // Raw mode swallows the interrupt signal, so Ctrl+C arrives here
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.event_handler.send_event(AppEvent::Shutdown)?;
            }
            KeyCode::Char('1') => {
                self.toggle_settings();
            }
            KeyCode::Char('2') => {
                self.toggle_details();
            }
            KeyCode::Char('r') => {
                info!("Resource list fetch requested");
                self.spawn_resource_fetch();
            }
            KeyCode::Char('u') => {
                info!("Resource update requested");
                self.spawn_resource_update();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                let (top, _) = self.stacked_mut();
                top.handle_key(key)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Route a mouse event topmost-first
    ///
    /// The first modal to consume the event ends the search, which keeps
    /// a click on an upper window from reaching the scrim of the one
    /// below it.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> AppResult<()> {
        let (top, bottom) = self.stacked_mut();
        if top.handle_mouse(mouse)? {
            return Ok(());
        }
        bottom.handle_mouse(mouse)?;
        Ok(())
    }

    /// Whether the details modal sits above the settings modal
    ///
    /// Closed controllers hold no anchor slot and sort below open ones.
    fn details_on_top(&self) -> bool {
        let settings_pos = self
            .settings_modal
            .mount_key()
            .and_then(|key| self.anchor.position(key));
        let details_pos = self
            .details_modal
            .mount_key()
            .and_then(|key| self.anchor.position(key));
        details_pos >= settings_pos
    }

    /// The two controllers ordered topmost-first
    fn stacked_mut(&mut self) -> (&mut ModalController, &mut ModalController) {
        if self.details_on_top() {
            (&mut self.details_modal, &mut self.settings_modal)
        } else {
            (&mut self.settings_modal, &mut self.details_modal)
        }
    }

    fn toggle_settings(&mut self) {
        let open = !self.settings_modal.is_open();
        self.settings_modal.set_open(open);
    }

    fn toggle_details(&mut self) {
        if self.details_modal.is_open() {
            self.details_modal.set_open(false);
            return;
        }
        self.details_modal.set_body(details_body(&self.state));
        self.details_modal.set_open(true);
    }

    /// Process background tasks and async operations
    async fn process_background_tasks(&mut self) -> AppResult<()> {
        // Forward settled lifecycle notifications onto the event bus
        while let Ok(lifecycle) = self.lifecycle_rx.try_recv() {
            self.event_handler
                .send_event(AppEvent::ModalLifecycle(lifecycle))?;
        }

        // Check for completed background tasks
        if let Some(event) = self.event_handler.try_receive_event().await {
            self.handle_app_event(event).await?;
        }

        Ok(())
    }

    /// Handle application events from background tasks
    async fn handle_app_event(&mut self, event: AppEvent) -> AppResult<()> {
        match event {
            AppEvent::ModalLifecycle(lifecycle) => {
                debug!(
                    modal_id = ?lifecycle.modal_id,
                    kind = lifecycle.kind.as_str(),
                    "Modal lifecycle settled"
                );
                let label = lifecycle.modal_id.as_deref().unwrap_or("modal");
                self.state
                    .add_info(format!("{} {}", label, lifecycle.kind.as_str()));
            }
            AppEvent::ResourceListLoaded {
                total_count,
                records,
            } => {
                debug!(
                    count = total_count,
                    fetched = records.len(),
                    "Resource list loaded"
                );
                self.state.add_info(format!(
                    "Loaded {} of {} resources",
                    records.len(),
                    total_count
                ));
                self.state.update_resources(total_count, records);
            }
            AppEvent::ResourceOperationCompleted {
                operation,
                result,
                duration_ms,
            } => match result {
                Ok(message) => {
                    debug!(
                        operation = operation.display_name(),
                        duration_ms, "Resource operation completed"
                    );
                    self.state.add_info(message);
                }
                Err(error) => {
                    warn!(
                        operation = operation.display_name(),
                        duration_ms, "Resource operation failed: {}", error
                    );
                    self.state
                        .add_error(format!("{} failed: {}", operation.display_name(), error));
                }
            },
            AppEvent::Error(error) => {
                warn!("Background task error: {}", error);
                self.state.add_error(error);
            }
            AppEvent::Shutdown => {
                debug!("Shutdown requested");
                self.state.set_should_quit(true);
            }
        }
        Ok(())
    }

    /// Fetch the resource collection without blocking the UI loop
    fn spawn_resource_fetch(&self) {
        let client = Arc::clone(&self.resource_client);
        let sender = self.event_handler.get_sender();

        tokio::spawn(async move {
            let fetch_start = Instant::now();
            let event = match client.list().await {
                Ok(page) => AppEvent::ResourceListLoaded {
                    total_count: page.count,
                    records: page.results,
                },
                Err(error) => AppEvent::ResourceOperationCompleted {
                    operation: ResourceOperation::List,
                    result: Err(error.to_string()),
                    duration_ms: fetch_start.elapsed().as_millis() as u64,
                },
            };
            if sender.send(event).is_err() {
                warn!("Event channel closed before the list result was delivered");
            }
        });
    }

    /// Rename the first fetched record without blocking the UI loop
    fn spawn_resource_update(&mut self) {
        let record = match self.state.resource_state.records.first() {
            Some(record) => record.clone(),
            None => {
                self.state
                    .add_info("No resource to update; press 'r' to fetch first".to_string());
                return;
            }
        };
        let client = Arc::clone(&self.resource_client);
        let sender = self.event_handler.get_sender();

        tokio::spawn(async move {
            let update_start = Instant::now();
            let changes = ResourceUpdate::new().name(format!("{} (edited)", record.name));
            let result = match client.update(record.id, changes).await {
                Ok(updated) => Ok(format!("Updated resource {} to \"{}\"", updated.id, updated.name)),
                Err(error) => Err(error.to_string()),
            };
            let event = AppEvent::ResourceOperationCompleted {
                operation: ResourceOperation::Update(record.id.to_string()),
                result,
                duration_ms: update_start.elapsed().as_millis() as u64,
            };
            if sender.send(event).is_err() {
                warn!("Event channel closed before the update result was delivered");
            }
        });
    }

    /// Get application startup time for performance monitoring
    pub fn startup_time(&self) -> Duration {
        self.startup_time
    }
}

/// Body content for the settings dialog
fn settings_body(config: &Config) -> Text<'static> {
    Text::from(vec![
        Line::from(format!("Theme            {}", config.ui.theme)),
        Line::from(format!("Mouse support    {}", config.ui.enable_mouse)),
        Line::from(format!("Refresh rate     {} ms", config.ui.refresh_rate_ms)),
        Line::from(""),
        Line::from(format!("Service URL      {}", config.client.base_url)),
        Line::from(format!("Page size        {}", config.client.page_size)),
        Line::from(format!(
            "Request timeout  {} ms",
            config.client.request_timeout_ms
        )),
        Line::from(""),
        Line::from(format!("Default size     {}", config.modal.default_size)),
        Line::from(format!("Close triggers   {}", config.modal.close_on.join(", "))),
    ])
}

/// Body content for the record details dialog
fn details_body(state: &AppState) -> Text<'static> {
    let records = &state.resource_state.records;
    if records.is_empty() {
        return Text::from("No resources loaded yet. Press 'r' to fetch the collection.");
    }

    let mut lines = Vec::with_capacity(records.len() * 2);
    for record in records {
        lines.push(Line::from(format!("{:>4}  {}", record.id, record.name)));
        if let Some(description) = &record.description {
            lines.push(Line::from(format!("      {}", description)));
        }
    }
    Text::from(lines)
}
