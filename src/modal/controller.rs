//! Modal visibility state machine
//!
//! The controller owns one modal's open/closed state. The open flag can
//! change for exactly two reasons: the caller sets it through
//! [`ModalController::set_open`] or [`ModalController::set_options`], or
//! a permitted dismissal request flips it through
//! [`ModalController::request_close`]. Both paths funnel into the same
//! observation point, so lifecycle notifications depend only on the flag
//! changing, never on which call site changed it.
//!
//! Notifications are deferred: a transition queues its event, and the
//! queue drains when the application signals that the frame reflecting
//! the change has been drawn (`after_render`). Rapid toggles before a
//! draw queue one event per transition and drain in order.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Text},
    widgets::Block,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use crate::error::AppResult;
use crate::ui::theme::Theme;

use super::anchor::{MountGuard, MountKey, OverlayAnchor};
use super::options::{ClosePolicy, CloseTrigger, ModalOptions};
use super::window::{centered_rect, WindowChrome, WindowRegions};
use super::LifecycleEvent;

/// Overlay scrim fade-in duration; cosmetic only, never gates lifecycle
const OVERLAY_FADE: Duration = Duration::from_millis(120);
/// Window border emphasis duration after opening
const BORDER_EMPHASIS: Duration = Duration::from_millis(160);

/// Controller for one dismissible modal
pub struct ModalController {
    options: ModalOptions,
    /// Last observed value of the open flag
    is_open: bool,
    anchor: OverlayAnchor,
    mount: Option<MountGuard>,
    pending: VecDeque<LifecycleEvent>,
    events_tx: Option<UnboundedSender<LifecycleEvent>>,
    /// Hit regions from the last draw, None when the last draw was closed
    regions: Option<WindowRegions>,
    title_content: Option<Line<'static>>,
    body: Text<'static>,
    footer: Option<Text<'static>>,
    scroll_offset: u16,
    max_scroll: u16,
    opened_at: Option<Instant>,
}

impl ModalController {
    /// Create a controller attached to the given anchor
    ///
    /// Options with `is_open = true` mount immediately and queue their
    /// `Opened` notification for the first settle point.
    pub fn new(options: ModalOptions, anchor: OverlayAnchor) -> Self {
        let mut controller = Self {
            options,
            is_open: false,
            anchor,
            mount: None,
            pending: VecDeque::new(),
            events_tx: None,
            regions: None,
            title_content: None,
            body: Text::default(),
            footer: None,
            scroll_offset: 0,
            max_scroll: 0,
            opened_at: None,
        };
        controller.sync_open();
        controller
    }

    /// Current configuration
    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    /// Replace the configuration, observing any open-flag change
    pub fn set_options(&mut self, options: ModalOptions) {
        self.options = options;
        self.sync_open();
    }

    /// Set the open flag directly
    pub fn set_open(&mut self, open: bool) {
        self.options.is_open = open;
        self.sync_open();
    }

    /// Whether the modal is currently open
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Correlation token carried on lifecycle notifications
    pub fn modal_id(&self) -> Option<&str> {
        self.options.modal_id.as_deref()
    }

    /// Dismissal permissions derived from the current options
    pub fn policy(&self) -> ClosePolicy {
        ClosePolicy::evaluate(&self.options)
    }

    /// Anchor slot held while open
    pub fn mount_key(&self) -> Option<MountKey> {
        self.mount.as_ref().map(|guard| guard.key())
    }

    /// Hit regions from the last draw
    pub fn regions(&self) -> Option<&WindowRegions> {
        self.regions.as_ref()
    }

    /// Current body scroll offset in lines
    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Whether notifications are waiting for the next settle point
    pub fn has_pending_lifecycle(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Forward drained lifecycle events to this channel as well
    pub fn set_lifecycle_sender(&mut self, sender: UnboundedSender<LifecycleEvent>) {
        self.events_tx = Some(sender);
    }

    /// Set styled content rendered in the title bar
    pub fn set_title_content(&mut self, content: Option<Line<'static>>) {
        self.title_content = content;
    }

    /// Set the body content
    pub fn set_body<T: Into<Text<'static>>>(&mut self, body: T) {
        self.body = body.into();
    }

    /// Set the footer content
    pub fn set_footer<T: Into<Text<'static>>>(&mut self, footer: T) {
        self.footer = Some(footer.into());
    }

    /// Remove the footer
    pub fn clear_footer(&mut self) {
        self.footer = None;
    }

    /// Request dismissal through the single policy gate
    ///
    /// A request while closed, or through a trigger the policy does not
    /// permit, is a silent no-op.
    pub fn request_close(&mut self, trigger: CloseTrigger) {
        if !self.is_open {
            trace!(trigger = trigger.as_str(), "Dismissal request while closed ignored");
            return;
        }

        if self.policy().permits(trigger) {
            debug!(
                modal_id = ?self.options.modal_id,
                trigger = trigger.as_str(),
                "Dismissal permitted"
            );
            self.options.is_open = false;
            self.sync_open();
        } else {
            debug!(
                modal_id = ?self.options.modal_id,
                trigger = trigger.as_str(),
                "Dismissal denied by policy"
            );
        }
    }

    /// Feed a key event from the application's global loop
    ///
    /// Returns whether the event was consumed. Escape goes through the
    /// dismissal gate; scroll keys move the body when scrolling is on.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<bool> {
        if !self.is_open {
            return Ok(false);
        }

        match key.code {
            KeyCode::Esc => {
                let permitted = self.policy().close_on_esc;
                self.request_close(CloseTrigger::Esc);
                Ok(permitted)
            }
            KeyCode::Up => Ok(self.scroll_by(-1)),
            KeyCode::Down => Ok(self.scroll_by(1)),
            KeyCode::PageUp => Ok(self.scroll_by(-(self.body_page() as i32))),
            KeyCode::PageDown => Ok(self.scroll_by(self.body_page() as i32)),
            _ => Ok(false),
        }
    }

    /// Feed a mouse event, hit-testing against the last drawn regions
    ///
    /// Returns whether the event was consumed. A click on the close
    /// affordance or the overlay scrim goes through the dismissal gate;
    /// clicks inside the window are swallowed without action. When the
    /// modal has no overlay, clicks outside the window fall through.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppResult<bool> {
        if !self.is_open {
            return Ok(false);
        }
        let regions = match self.regions {
            Some(regions) => regions,
            None => return Ok(false),
        };

        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(close) = regions.close_button {
                    if contains(close, x, y) {
                        self.request_close(CloseTrigger::Button);
                        return Ok(true);
                    }
                }
                if contains(regions.window, x, y) {
                    return Ok(true);
                }
                if self.options.has_overlay {
                    // The scrim swallows the click whether or not it dismisses
                    self.request_close(CloseTrigger::Overlay);
                    return Ok(true);
                }
                Ok(false)
            }
            MouseEventKind::ScrollUp if contains(regions.window, x, y) => Ok(self.scroll_by(-1)),
            MouseEventKind::ScrollDown if contains(regions.window, x, y) => Ok(self.scroll_by(1)),
            _ => Ok(false),
        }
    }

    /// Draw the modal at the screen root
    ///
    /// Closed modals draw nothing. Open modals draw the optional scrim
    /// across the whole screen, then the sized window with its chrome,
    /// and record the regions for hit-testing.
    pub fn render(&mut self, frame: &mut Frame, screen: Rect, theme: &Theme) {
        if !self.is_open {
            self.regions = None;
            return;
        }

        let age = self.age();

        if self.options.has_overlay {
            let style = if age < OVERLAY_FADE {
                theme.overlay_soft_style()
            } else {
                theme.overlay_style()
            };
            frame.render_widget(Block::default().style(style), screen);
        }

        let (percent_x, percent_y) = self.options.size.percentages();
        let area = centered_rect(percent_x, percent_y, screen);

        let policy = self.policy();
        let mut chrome = WindowChrome::new()
            .close_button(policy.close_on_button)
            .scrollable(self.options.can_scroll_body)
            .padded(self.options.has_body_padding)
            .emphasized(age < BORDER_EMPHASIS)
            .scroll(self.scroll_offset)
            .body(self.body.clone());
        if let Some(title) = self.options.title.as_deref() {
            chrome = chrome.title(title);
        }
        if let Some(content) = self.title_content.clone() {
            chrome = chrome.title_content(content);
        }
        if let Some(footer) = self.footer.clone() {
            chrome = chrome.footer(footer);
        }

        let content_height = chrome.content_height();
        let regions = chrome.render(frame, area, theme);

        self.max_scroll = content_height.saturating_sub(regions.body.height);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);
        self.regions = Some(regions);
    }

    /// Settle point: the frame reflecting any transition has been drawn
    ///
    /// Drains queued notifications in transition order, forwarding each
    /// to the registered channel, and returns them to the caller.
    pub fn after_render(&mut self) -> Vec<LifecycleEvent> {
        let events: Vec<LifecycleEvent> = self.pending.drain(..).collect();
        if let Some(sender) = &self.events_tx {
            for event in &events {
                if sender.send(event.clone()).is_err() {
                    trace!("Lifecycle receiver dropped, returning events to caller only");
                }
            }
        }
        events
    }

    /// Observe the open flag and react to a change
    fn sync_open(&mut self) {
        let target = self.options.is_open;
        if target == self.is_open {
            return;
        }
        self.is_open = target;

        if target {
            debug!(modal_id = ?self.options.modal_id, "Modal opened");
            self.scroll_offset = 0;
            self.max_scroll = 0;
            self.opened_at = Some(Instant::now());
            self.mount = Some(self.anchor.mount(self.options.modal_id.as_deref()));
            self.pending
                .push_back(LifecycleEvent::opened(self.options.modal_id.clone()));
        } else {
            debug!(modal_id = ?self.options.modal_id, "Modal closed");
            self.mount = None;
            self.regions = None;
            self.opened_at = None;
            self.pending
                .push_back(LifecycleEvent::closed(self.options.modal_id.clone()));
        }
    }

    fn age(&self) -> Duration {
        match self.opened_at {
            Some(opened_at) => opened_at.elapsed(),
            None => BORDER_EMPHASIS,
        }
    }

    fn body_page(&self) -> u16 {
        self.regions
            .map(|regions| regions.body.height)
            .unwrap_or(1)
            .max(1)
    }

    /// Move the body scroll, clamped to the content range
    fn scroll_by(&mut self, delta: i32) -> bool {
        if !self.options.can_scroll_body {
            return false;
        }
        let next = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.scroll_offset.saturating_add(delta as u16)
        };
        self.scroll_offset = next.min(self.max_scroll);
        true
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
