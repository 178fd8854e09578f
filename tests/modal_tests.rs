//! Modal system tests
//!
//! Exercises the dismissal policy, window chrome and overlay anchor
//! through the public API, rendering into a test backend where cell
//! output matters.

use std::time::Duration;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, style::Color, Terminal};
use tui_modal::ui::theme::Theme;
use tui_modal::{
    CloseTrigger, CloseTriggerSet, ModalController, ModalOptions, ModalSize, OverlayAnchor,
};

fn draw(terminal: &mut Terminal<TestBackend>, controller: &mut ModalController) {
    let theme = Theme::default();
    terminal
        .draw(|frame| {
            let screen = frame.size();
            controller.render(frame, screen, &theme);
        })
        .expect("draw failed");
}

fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Test the documented option defaults
#[test]
fn test_option_defaults() {
    let options = ModalOptions::new();

    assert!(options.modal_id.is_none());
    assert!(!options.is_open);
    assert!(options.title.is_none());
    assert_eq!(options.size, ModalSize::Regular);
    assert!(options.allow_close);
    assert!(options.has_overlay);
    assert!(options.close_on.contains(CloseTrigger::Button));
    assert!(!options.close_on.contains(CloseTrigger::Esc));
    assert!(!options.close_on.contains(CloseTrigger::Overlay));
    assert!(options.can_scroll_body);

    println!("✓ Option defaults are correct");
}

/// Test that dismissal needs both the master switch and trigger membership
#[test]
fn test_policy_needs_switch_and_membership() {
    let all = CloseTriggerSet::from_triggers(&[
        CloseTrigger::Button,
        CloseTrigger::Esc,
        CloseTrigger::Overlay,
    ]);

    let mut controller = ModalController::new(
        ModalOptions::new().open(true).allow_close(false).close_on(all),
        OverlayAnchor::new(),
    );
    let policy = controller.policy();
    assert!(!policy.close_on_button);
    assert!(!policy.close_on_esc);
    assert!(!policy.close_on_overlay);

    controller.set_options(controller.options().clone().allow_close(true));
    let policy = controller.policy();
    assert!(policy.close_on_button);
    assert!(policy.close_on_esc);
    assert!(policy.close_on_overlay);

    println!("✓ Policy gates on allow_close and trigger membership");
}

/// Test that a closed modal leaves the frame untouched
#[test]
fn test_closed_modal_draws_nothing() {
    let backend = TestBackend::new(40, 12);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(ModalOptions::new(), OverlayAnchor::new());

    draw(&mut terminal, &mut controller);

    let buffer = terminal.backend().buffer();
    assert!(buffer.content.iter().all(|cell| cell.symbol == " "));
    assert!(controller.regions().is_none());

    println!("✓ Closed modal draws nothing");
}

/// Test that an open modal draws its window and records hit regions
#[test]
fn test_open_modal_draws_window() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(
        ModalOptions::new().open(true).title("Details"),
        OverlayAnchor::new(),
    );

    draw(&mut terminal, &mut controller);

    let regions = controller.regions().expect("regions after open draw");
    let window = regions.window;
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer.get(window.x, window.y).symbol, "┌");

    // Default close_on includes the button, so the title bar is present
    assert!(regions.title_bar.is_some());
    assert!(regions.close_button.is_some());

    println!("✓ Open modal draws its window at {:?}", window);
}

/// Test that the overlay scrim styles cells outside the window
#[test]
fn test_overlay_dims_the_background() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(
        ModalOptions::new().open(true),
        OverlayAnchor::new(),
    );

    // Let the scrim fade finish so the full style is in effect
    std::thread::sleep(Duration::from_millis(150));
    draw(&mut terminal, &mut controller);

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer.get(0, 0).bg, Color::Black);

    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut bare = ModalController::new(
        ModalOptions::new().open(true).has_overlay(false),
        OverlayAnchor::new(),
    );
    std::thread::sleep(Duration::from_millis(150));
    draw(&mut terminal, &mut bare);

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer.get(0, 0).bg, Color::Reset);

    println!("✓ Overlay scrim dims the background only when enabled");
}

/// Test that a title bar appears only for a title or a close affordance
#[test]
fn test_title_bar_presence() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");

    // No title and no permitted close button means no title bar
    let mut plain = ModalController::new(
        ModalOptions::new().open(true).close_on(CloseTriggerSet::EMPTY),
        OverlayAnchor::new(),
    );
    draw(&mut terminal, &mut plain);
    let regions = plain.regions().expect("regions");
    assert!(regions.title_bar.is_none());
    assert!(regions.close_button.is_none());

    let mut titled = ModalController::new(
        ModalOptions::new()
            .open(true)
            .title("Settings")
            .close_on(CloseTriggerSet::EMPTY),
        OverlayAnchor::new(),
    );
    draw(&mut terminal, &mut titled);
    let regions = titled.regions().expect("regions");
    assert!(regions.title_bar.is_some());
    assert!(regions.close_button.is_none());

    println!("✓ Title bar appears only when it has something to show");
}

/// Test that a click on the close affordance dismisses the modal
#[test]
fn test_close_button_click_dismisses() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(
        ModalOptions::new().open(true).title("Details"),
        OverlayAnchor::new(),
    );

    draw(&mut terminal, &mut controller);
    let close = controller
        .regions()
        .and_then(|regions| regions.close_button)
        .expect("close affordance");

    let consumed = controller
        .handle_mouse(left_click(close.x + 1, close.y))
        .expect("mouse");
    assert!(consumed);
    assert!(!controller.is_open());

    println!("✓ Close affordance click dismisses the modal");
}

/// Test that the scrim swallows outside clicks even when they cannot dismiss
#[test]
fn test_overlay_click_consumed_even_when_denied() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");

    // Overlay clicks are not in the default trigger set
    let mut controller = ModalController::new(
        ModalOptions::new().open(true),
        OverlayAnchor::new(),
    );
    draw(&mut terminal, &mut controller);

    let consumed = controller.handle_mouse(left_click(0, 0)).expect("mouse");
    assert!(consumed);
    assert!(controller.is_open());

    // Without an overlay the same click falls through to the view below
    let mut bare = ModalController::new(
        ModalOptions::new().open(true).has_overlay(false),
        OverlayAnchor::new(),
    );
    draw(&mut terminal, &mut bare);

    let consumed = bare.handle_mouse(left_click(0, 0)).expect("mouse");
    assert!(!consumed);
    assert!(bare.is_open());

    println!("✓ Scrim swallows outside clicks; absent scrim lets them through");
}

/// Test that an outside click dismisses when the overlay trigger is set
#[test]
fn test_overlay_click_dismisses_when_permitted() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(
        ModalOptions::new()
            .open(true)
            .close_on(CloseTriggerSet::from_triggers(&[
                CloseTrigger::Button,
                CloseTrigger::Overlay,
            ])),
        OverlayAnchor::new(),
    );
    draw(&mut terminal, &mut controller);

    // A click inside the window is swallowed without dismissing
    let window = controller.regions().expect("regions").window;
    let inside = controller
        .handle_mouse(left_click(window.x + 2, window.y + 2))
        .expect("mouse");
    assert!(inside);
    assert!(controller.is_open());

    let consumed = controller.handle_mouse(left_click(0, 0)).expect("mouse");
    assert!(consumed);
    assert!(!controller.is_open());

    println!("✓ Overlay click dismisses when the trigger set permits it");
}

/// Test that body scrolling clamps to the content range
#[test]
fn test_body_scroll_clamps_to_content() {
    use crossterm::event::{KeyCode, KeyEvent};

    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    let mut controller = ModalController::new(
        ModalOptions::new().open(true),
        OverlayAnchor::new(),
    );

    let body: Vec<String> = (0..30).map(|i| format!("line {}", i)).collect();
    controller.set_body(body.join("\n"));

    draw(&mut terminal, &mut controller);
    let body_height = controller.regions().expect("regions").body.height;
    assert!(body_height > 0);

    for _ in 0..20 {
        controller
            .handle_key(KeyEvent::from(KeyCode::PageDown))
            .expect("key");
    }
    draw(&mut terminal, &mut controller);

    let max_offset = 30 - body_height;
    assert_eq!(controller.scroll_offset(), max_offset);

    for _ in 0..40 {
        controller
            .handle_key(KeyEvent::from(KeyCode::Up))
            .expect("key");
    }
    assert_eq!(controller.scroll_offset(), 0);

    println!("✓ Body scroll clamps to [0, {}]", max_offset);
}

/// Test that concurrent modals stack at the shared anchor in open order
#[test]
fn test_concurrent_modals_stack_in_open_order() {
    let anchor = OverlayAnchor::new();
    let mut first = ModalController::new(
        ModalOptions::new().modal_id("first").open(true),
        anchor.clone(),
    );
    let mut second = ModalController::new(
        ModalOptions::new().modal_id("second").open(true),
        anchor.clone(),
    );

    assert_eq!(
        anchor.mounted_ids(),
        vec![Some("first".to_string()), Some("second".to_string())]
    );

    // Each holds its own slot; closing one leaves the other mounted
    first.set_open(false);
    assert_eq!(anchor.mounted_ids(), vec![Some("second".to_string())]);

    second.set_open(false);
    assert!(anchor.is_empty());

    println!("✓ Concurrent modals stack and release independently");
}

/// Test that reopening acquires a fresh anchor slot
#[test]
fn test_reopen_acquires_a_fresh_slot() {
    let anchor = OverlayAnchor::new();
    let mut controller = ModalController::new(
        ModalOptions::new().modal_id("dialog").open(true),
        anchor.clone(),
    );

    let first_key = controller.mount_key().expect("mounted while open");
    controller.set_open(false);
    assert!(controller.mount_key().is_none());
    assert!(!anchor.is_mounted(first_key));

    controller.set_open(true);
    let second_key = controller.mount_key().expect("mounted again");
    assert_ne!(first_key, second_key);
    assert!(anchor.is_mounted(second_key));

    println!("✓ Reopening acquires a fresh anchor slot");
}
