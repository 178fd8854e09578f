//! Stateless dialog window chrome
//!
//! Renders the fixed parts of a modal window: border, optional title bar
//! with close affordance, body and footer. The chrome is a pure function
//! of its inputs and holds nothing between frames; where the close
//! affordance landed is reported outward through [`WindowRegions`] so the
//! caller can hit-test clicks against it. Whether activating the
//! affordance actually dismisses anything is the caller's decision.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Theme;

/// Glyph drawn for the close affordance
const CLOSE_GLYPH: &str = "✕";

/// Cell regions the chrome occupied in the last draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowRegions {
    /// Full window including borders
    pub window: Rect,
    /// Title bar row, absent when the window has no title bar
    pub title_bar: Option<Rect>,
    /// Close affordance cells, absent when not shown
    pub close_button: Option<Rect>,
    /// Body content region
    pub body: Rect,
    /// Footer region, absent when no footer content was given
    pub footer: Option<Rect>,
}

/// Calculate a centered rectangle covering the given screen percentages
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Dialog window chrome for a single frame
pub struct WindowChrome<'a> {
    title: Option<&'a str>,
    title_content: Option<Line<'a>>,
    body: Text<'a>,
    footer: Option<Text<'a>>,
    has_close_button: bool,
    can_scroll_body: bool,
    has_body_padding: bool,
    emphasized: bool,
    scroll_offset: u16,
}

impl<'a> Default for WindowChrome<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> WindowChrome<'a> {
    pub fn new() -> Self {
        Self {
            title: None,
            title_content: None,
            body: Text::default(),
            footer: None,
            has_close_button: false,
            can_scroll_body: true,
            has_body_padding: true,
            emphasized: false,
            scroll_offset: 0,
        }
    }

    /// Set the title text
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set styled content rendered in the title bar instead of plain text
    pub fn title_content(mut self, content: Line<'a>) -> Self {
        self.title_content = Some(content);
        self
    }

    /// Set the body content
    pub fn body<T: Into<Text<'a>>>(mut self, body: T) -> Self {
        self.body = body.into();
        self
    }

    /// Set the footer content
    pub fn footer<T: Into<Text<'a>>>(mut self, footer: T) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Show or hide the close affordance
    pub fn close_button(mut self, show: bool) -> Self {
        self.has_close_button = show;
        self
    }

    /// Scroll the body instead of clipping it
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.can_scroll_body = scrollable;
        self
    }

    /// Apply inner padding around the body
    pub fn padded(mut self, padded: bool) -> Self {
        self.has_body_padding = padded;
        self
    }

    /// Draw the border with the emphasis style
    pub fn emphasized(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }

    /// Body scroll offset in lines, ignored when not scrollable
    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Whether a title bar row will be rendered at all
    ///
    /// An empty title bar is never drawn: no title, no title content and
    /// no close affordance means the body starts at the top edge.
    pub fn has_title_bar(&self) -> bool {
        self.title.is_some() || self.title_content.is_some() || self.has_close_button
    }

    /// Height of the body content in lines, before clipping
    pub fn content_height(&self) -> u16 {
        self.body.height() as u16
    }

    /// Draw the chrome into `area` and report the regions it occupied
    pub fn render(self, frame: &mut Frame, area: Rect, theme: &Theme) -> WindowRegions {
        let mut regions = WindowRegions {
            window: area,
            ..WindowRegions::default()
        };

        // Punch a hole in whatever was drawn underneath
        frame.render_widget(Clear, area);

        let border_style = if self.emphasized {
            theme.window_border_emphasis_style()
        } else {
            theme.window_border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(theme.window_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            regions.body = inner;
            return regions;
        }

        let mut content = inner;

        if self.has_title_bar() {
            let title_bar = Rect::new(inner.x, inner.y, inner.width, 1);
            frame.render_widget(
                Paragraph::new("").style(theme.title_bar_style()),
                title_bar,
            );

            let mut text_area = title_bar;
            if self.has_close_button && title_bar.width >= 3 {
                let close = Rect::new(title_bar.x + title_bar.width - 3, title_bar.y, 3, 1);
                frame.render_widget(
                    Paragraph::new(CLOSE_GLYPH)
                        .style(theme.close_button_style())
                        .alignment(Alignment::Center),
                    close,
                );
                text_area.width = title_bar.width - 3;
                regions.close_button = Some(close);
            }

            let title_line = match self.title_content {
                Some(content) => content,
                None => Line::from(self.title.unwrap_or_default()),
            };
            frame.render_widget(
                Paragraph::new(title_line).style(theme.title_style()),
                text_area,
            );

            regions.title_bar = Some(title_bar);
            content.y += 1;
            content.height = content.height.saturating_sub(1);
        }

        if let Some(footer) = self.footer {
            let footer_height = (footer.height() as u16).min(3).min(content.height);
            if footer_height > 0 {
                let footer_area = Rect::new(
                    content.x,
                    content.y + content.height - footer_height,
                    content.width,
                    footer_height,
                );
                frame.render_widget(
                    Paragraph::new(footer)
                        .style(theme.footer_style())
                        .alignment(Alignment::Center),
                    footer_area,
                );
                content.height -= footer_height;
                regions.footer = Some(footer_area);
            }
        }

        let body_area = if self.has_body_padding {
            content.inner(&Margin {
                horizontal: 2,
                vertical: 1,
            })
        } else {
            content
        };

        if body_area.width > 0 && body_area.height > 0 {
            // Scrollable bodies keep one display row per content line so the
            // scroll range stays exact; clipped bodies may wrap instead.
            let paragraph = Paragraph::new(self.body).style(theme.body_style());
            let paragraph = if self.can_scroll_body {
                paragraph.scroll((self.scroll_offset, 0))
            } else {
                paragraph.wrap(Wrap { trim: true })
            };
            frame.render_widget(paragraph, body_area);
        }

        regions.body = body_area;
        regions
    }
}
