//! User Interface module
//!
//! Renders the demo base view the modals overlay: a header, the fetched
//! resource collection and a status line. Modal windows themselves are
//! drawn by their controllers after this view each frame.

pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracing::debug;

use crate::{app::state::AppState, config::UIConfig};
use theme::Theme;

/// Main UI renderer for the demo shell
pub struct UI {
    /// Current theme
    theme: Theme,
}

impl UI {
    /// Create a new UI instance
    pub fn new(config: &UIConfig) -> Self {
        debug!("Initializing UI with theme: {}", config.theme);

        Self {
            theme: Theme::load(&config.theme),
        }
    }

    /// Active theme, shared with the modal controllers
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render the base view
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let size = frame.size();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Resource list
                Constraint::Length(1), // Status line
            ])
            .split(size);

        self.render_header(frame, main_chunks[0], state);
        self.render_resources(frame, main_chunks[1], state);
        self.render_status_line(frame, main_chunks[2], state);
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Terminal resized to {}x{}", width, height);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (count_text, count_style) = match state.resource_state.total_count {
            Some(total) => (
                format!(
                    " {} of {} resources loaded ",
                    state.resource_state.records.len(),
                    total
                ),
                self.theme.success_style(),
            ),
            None => (
                " No resources loaded ".to_string(),
                self.theme.muted_style(),
            ),
        };

        let header = Paragraph::new(count_text)
            .block(
                Block::default()
                    .title("TUI Modal Demo")
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .style(count_style);

        frame.render_widget(header, area);
    }

    fn render_resources(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .title("Resources")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        if state.resource_state.records.is_empty() {
            let placeholder = Paragraph::new("Press 'r' to fetch the resource collection")
                .block(block)
                .style(self.theme.muted_style());
            frame.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = state
            .resource_state
            .records
            .iter()
            .map(|record| {
                let description = record.description.as_deref().unwrap_or("");
                ListItem::new(Line::from(format!(
                    " {:>4}  {:<24} {}",
                    record.id, record.name, description
                )))
            })
            .collect();

        let list = List::new(items).block(block).style(self.theme.text_style());
        frame.render_widget(list, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (text, style) = if let Some(error) = state.notification_state.errors.last() {
            (format!(" {} ", error.message), self.theme.error_style())
        } else if let Some(info) = state.notification_state.info_messages.last() {
            (format!(" {} ", info.message), self.theme.info_style())
        } else {
            (
                " q quit | 1/2 toggle modals | r fetch | u update first resource ".to_string(),
                self.theme.muted_style(),
            )
        };

        frame.render_widget(Paragraph::new(text).style(style), area);
    }
}
