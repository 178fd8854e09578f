use std::{
    env, process,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};
use tui_modal::{
    config::Config, error::AppResult, App, CloseTrigger, CloseTriggerSet, ModalController,
    ModalOptions, OverlayAnchor,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command line arguments first (before logging to avoid noise)
    let args: Vec<String> = env::args().collect();

    // Handle version flag
    if args.contains(&"--version".to_string()) || args.contains(&"-V".to_string()) {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    // Handle help flag
    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        process::exit(0);
    }

    // Initialize logging
    tui_modal::initialize_logging()
        .map_err(|e| tui_modal::error::AppError::application(&e.to_string()))?;
    let start_time = Instant::now();

    // Check if we should run in demo mode or TUI mode
    let demo_mode = args.contains(&"--demo".to_string())
        || env::var("TUI_MODAL_DEMO_MODE").is_ok()
        || env::var("TERM").unwrap_or_default().is_empty();

    if demo_mode {
        info!("🚀 TUI Modal Demo Mode Starting...");
        run_demo_mode(start_time).await
    } else {
        info!("🚀 TUI Modal Starting...");
        run_full_tui_mode(start_time).await
    }
}

async fn run_demo_mode(start_time: Instant) -> AppResult<()> {
    // Load configuration
    let config = Config::default();
    info!("📋 Configuration loaded: {}", config.app.name);

    // Walk one modal through its lifecycle without a terminal
    let anchor = OverlayAnchor::new();
    let mut modal = ModalController::new(
        ModalOptions::from_defaults(&config.modal)
            .modal_id("demo")
            .title("Demo Dialog"),
        anchor.clone(),
    );

    modal.set_open(true);
    for event in modal.after_render() {
        info!("🪟 Lifecycle: {:?} {}", event.modal_id, event.kind.as_str());
    }

    // The default policy only honors the close button
    modal.request_close(CloseTrigger::Overlay);
    info!("🔒 Overlay click dismissal honored: {}", !modal.is_open());
    modal.request_close(CloseTrigger::Button);
    info!("🔓 Close button dismissal honored: {}", !modal.is_open());
    for event in modal.after_render() {
        info!("🪟 Lifecycle: {:?} {}", event.modal_id, event.kind.as_str());
    }

    // Two dialogs stack at the shared anchor in open order
    let mut first = ModalController::new(
        ModalOptions::new().modal_id("first").open(true),
        anchor.clone(),
    );
    let mut second = ModalController::new(
        ModalOptions::new()
            .modal_id("second")
            .open(true)
            .close_on(CloseTriggerSet::from_triggers(&[
                CloseTrigger::Button,
                CloseTrigger::Esc,
            ])),
        anchor.clone(),
    );
    info!(
        "🗂️  Stacked dialogs (bottom to top): {:?}",
        anchor.mounted_ids()
    );
    first.set_open(false);
    second.set_open(false);
    first.after_render();
    second.after_render();

    // Probe the resource service
    match tui_modal::client::ResourceClient::new(config.client.clone()) {
        Ok(client) => {
            info!("✅ Resource client initialized successfully");

            use tui_modal::client::ResourceApi;
            match client.list().await {
                Ok(page) => {
                    info!(
                        "📦 Resource collection: {} of {} records fetched",
                        page.results.len(),
                        page.count
                    );
                    for (i, record) in page.results.iter().take(5).enumerate() {
                        info!("  {}. {} - {}", i + 1, record.id, record.name);
                    }
                    if page.results.len() > 5 {
                        info!("  ... and {} more records", page.results.len() - 5);
                    }
                }
                Err(e) => {
                    warn!("⚠️  Failed to fetch the resource collection: {}", e);
                }
            }
        }
        Err(e) => {
            warn!("⚠️  Failed to initialize resource client: {}", e);
        }
    }

    // Show demo UI components info
    info!("🎨 UI Components Available:");
    info!("  • Base View - Resource collection and status line");
    info!("  • Settings Dialog - Medium window, Esc and ✕ dismiss");
    info!("  • Details Dialog - Regular window, Esc, ✕ and overlay click dismiss");
    info!("  • Overlay Anchor - Shared mount point, insertion-order stacking");

    info!("⌨️  Key Bindings:");
    info!("  • 1 / 2 - Toggle the settings and details dialogs");
    info!("  • r - Fetch the resource collection");
    info!("  • u - Update the first fetched resource");
    info!("  • Arrow Keys / PgUp, PgDn - Scroll a dialog body");
    info!("  • Esc - Dismiss the focused dialog, or quit with none open");
    info!("  • q - Quit application");

    // Simulate application running
    info!("✨ TUI Modal Demo completed successfully!");

    let duration = start_time.elapsed();
    info!("⏱️  Total execution time: {:?}", duration);

    if duration > Duration::from_secs(1) {
        warn!("⚠️  Startup time exceeded 1 second target: {:?}", duration);
    } else {
        info!("🎯 Performance target met: < 1 second");
    }

    info!("👋 TUI Modal Demo finished.");
    Ok(())
}

fn print_help() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]", env!("CARGO_PKG_NAME"));
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print this help message and exit");
    println!("    -V, --version    Print version information and exit");
    println!("        --demo       Run in demo mode (non-interactive)");
    println!();
    println!("ENVIRONMENT:");
    println!("    TUI_MODAL_DEMO_MODE   Set to run in demo mode");
    println!("    RUST_LOG              Set logging level (debug, info, warn, error)");
    println!();
    println!("EXAMPLES:");
    println!("    {}              Start interactive TUI mode", env!("CARGO_PKG_NAME"));
    println!("    {} --demo       Run in demo mode", env!("CARGO_PKG_NAME"));
    println!("    {} --version    Show version information", env!("CARGO_PKG_NAME"));
}

async fn run_full_tui_mode(start_time: Instant) -> AppResult<()> {
    // Try to initialize the full TUI application
    match App::new().await {
        Ok(app) => {
            let startup_duration = app.startup_time();
            debug!("Application startup time: {:?}", startup_duration);

            if startup_duration > Duration::from_secs(1) {
                warn!("⚠️  Startup time exceeded 1 second: {:?}", startup_duration);
            }

            // Try to run the TUI
            match app.run().await {
                Ok(_) => {
                    info!("TUI Modal application terminated gracefully");
                    Ok(())
                }
                Err(e) => {
                    warn!("TUI mode failed: {}. Falling back to demo mode.", e);
                    warn!("Use 'tui-modal --demo' to run in demo mode explicitly.");
                    // Fall back to demo mode
                    run_demo_mode(start_time).await
                }
            }
        }
        Err(e) => {
            warn!(
                severity = e.severity().as_str(),
                "Failed to initialize TUI: {}. Running in demo mode.", e
            );
            warn!("This might be because:");
            warn!("  • The resource service URL in the config is invalid");
            warn!("  • Terminal doesn't support TUI mode");
            warn!("  • Missing required dependencies");
            warn!("Use 'tui-modal --demo' to run in demo mode explicitly.");
            run_demo_mode(start_time).await
        }
    }
}
