// Composition root: wires the clock, clipboard and terminal around the MVU TUI

use anyhow::{Context, Result};
use artifact_demo_core::ports::{ClipboardPort, Clock};
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::adapters::{clipboard::SystemClipboard, clock::SystemClock};
use crate::cli::CliArgs;
use crate::config::{Config, MIN_TICK_RATE};
use crate::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};

/// How long the input thread blocks in one poll
const INPUT_POLL: Duration = Duration::from_millis(100);

/// The main application struct that coordinates everything
pub struct ArtifactDemoApp {
    /// The TUI model (MVU pattern)
    tui_model: TuiModel,

    /// Where copy buttons put their text
    clipboard: SystemClipboard<io::Stdout>,

    /// Terminal for rendering
    terminal: Terminal<CrosstermBackend<io::Stdout>>,

    /// Longest the loop sleeps when no timer is pending
    tick_rate: Duration,
}

impl ArtifactDemoApp {
    /// Create the application and take over the terminal
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing artifact demo, start page {:?}", config.ui.start_page);

        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let tui_model = TuiModel::new(&config, clock);
        let clipboard = SystemClipboard::new();

        // Initialize terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            tui_model,
            clipboard,
            terminal,
            tick_rate: config.ui.tick_rate.max(MIN_TICK_RATE),
        })
    }

    /// Run the application until the user quits
    pub fn run(self) -> Result<()> {
        info!("Starting artifact demo");

        let ArtifactDemoApp {
            mut tui_model,
            mut clipboard,
            mut terminal,
            tick_rate,
        } = self;

        let (event_tx, event_rx) = unbounded();
        spawn_input_thread(event_tx);

        let result = run_main_loop(&mut tui_model, &mut clipboard, &mut terminal, event_rx, tick_rate);

        let abandoned = tui_model.demo.cancel_all();
        if abandoned > 0 {
            info!("Dropped {} pending completions on exit", abandoned);
        }

        shutdown(&mut terminal)?;
        result
    }
}

/// Forward terminal events to the main loop until it hangs up.
/// The thread ends with the process if no further event arrives.
fn spawn_input_thread(sender: Sender<Event>) {
    thread::spawn(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if sender.send(event).is_err() {
                        // Main loop gone, stop reading
                        return;
                    }
                }
                Err(e) => {
                    error!("Failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => {}
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                return;
            }
        }
    });
}

/// Main application loop. Sleeps until the next key press or the next
/// scheduled completion, whichever comes first.
fn run_main_loop(
    tui_model: &mut TuiModel,
    clipboard: &mut SystemClipboard<io::Stdout>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    event_rx: Receiver<Event>,
    tick_rate: Duration,
) -> Result<()> {
    let mut needs_redraw = true;

    if let Ok(size) = terminal.size() {
        TuiUpdate::handle_resize(tui_model, size.width, size.height)?;
    }

    loop {
        if needs_redraw {
            render(terminal, tui_model)?;
            needs_redraw = false;
        }

        let timeout = tui_model
            .time_until_next()
            .map_or(tick_rate, |until| until.min(tick_rate));

        select! {
            recv(event_rx) -> event => match event {
                Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                    let message = TuiUpdate::handle_key(tui_model, key_event.code, key_event.modifiers)?;
                    apply_message(tui_model, clipboard, message);
                    needs_redraw = true;
                }
                Ok(Event::Resize(width, height)) => {
                    TuiUpdate::handle_resize(tui_model, width, height)?;
                    needs_redraw = true;
                }
                Ok(_) => {}
                Err(_) => {
                    error!("Input thread stopped, exiting main loop");
                    break;
                }
            },
            default(timeout) => {}
        }

        let fired = tui_model.run_due();
        if fired > 0 {
            debug!("Fired {} timers", fired);
            needs_redraw = true;
        }

        if tui_model.should_quit {
            info!("Quit requested, exiting main loop");
            break;
        }
    }

    Ok(())
}

/// Carry out a side effect requested by the update
pub fn apply_message<C: ClipboardPort + ?Sized>(tui_model: &mut TuiModel, clipboard: &mut C, message: TuiMessage) {
    match message {
        TuiMessage::Quit => {
            tui_model.should_quit = true;
        }
        TuiMessage::CopyToClipboard { index, text } => {
            let succeeded = match clipboard.copy(&text) {
                Ok(()) => {
                    info!("Copied snippet {} to clipboard", index);
                    true
                }
                Err(e) => {
                    warn!("Failed to copy snippet {}: {:#}", index, e);
                    false
                }
            };
            tui_model.showcase.finish_copy(index, succeeded);
        }
        TuiMessage::None => {}
    }
}

/// Render the TUI
fn render(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, tui_model: &TuiModel) -> Result<()> {
    terminal.draw(|frame| {
        TuiView::render(tui_model, frame);
    })?;

    Ok(())
}

/// Clean shutdown
fn shutdown(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    info!("Shutting down artifact demo");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Path of the log file. The TUI owns the screen, so logs go to disk.
pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("artifact-demo")
        .join("artifact-demo.log")
}

/// Send tracing output to the log file, filtered by `RUST_LOG`
pub fn init_tracing() -> Result<PathBuf> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

/// Entry point behind the binary
pub fn run(cli_args: CliArgs) -> Result<()> {
    let log_path = init_tracing()?;
    info!("Logging to {}", log_path.display());

    let config = Config::from_cli_and_file(cli_args)?;

    let app = ArtifactDemoApp::new(config)?;

    if let Err(e) = app.run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Artifact demo shut down cleanly");
    Ok(())
}
