//! `TaskDeck`: terminal task tracker with idle nudges.
//!
//! Launches the TUI over the task list stored in the data directory.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Default data directory
//! cargo run --bin taskdeck
//!
//! # Scratch list in dark mode
//! cargo run --bin taskdeck -- --data-dir /tmp/tasks --dark
//!
//! # Or via environment variables
//! TASKDECK_DATA_DIR=/tmp/tasks TASKDECK_LOG=debug cargo run
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        EventStream,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::tasks::{FileStore, KeyValueStore, TaskStorage};
use taskdeck::ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(data_dir = %config.data_dir.display(), "taskdeck starting");

    let files: Box<dyn KeyValueStore> = Box::new(FileStore::new(config.data_dir.clone()));
    let storage = TaskStorage::new(files);
    if cli.reset {
        storage.clear();
    }
    let app = App::new(&config, storage, Instant::now());

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, app, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
///
/// Waits on terminal events, the countdown display tick and the
/// housekeeping tick; redraws after each. The intervals are dropped with
/// the loop, which cancels every timer.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    config: &ClientConfig,
) -> io::Result<()> {
    let size = terminal.size()?;
    app.set_viewport(Rect::new(0, 0, size.width, size.height));

    let mut events = EventStream::new();
    let mut display_tick = tokio::time::interval(config.tick_interval);
    display_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut housekeeping = tokio::time::interval(config.poll_interval);
    housekeeping.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(&event, Instant::now()),
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            _ = display_tick.tick() => app.refresh_countdown(Instant::now()),
            _ = housekeeping.tick() => app.housekeeping(Instant::now()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
