use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flickdeck_core::settings::Settings;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
mod ui;
mod viewport;
use ui::app::App;

/// Drag a card, flick it off the table, watch the deck restock itself.
#[derive(Debug, Parser)]
#[command(name = "flickdeck", version, about)]
struct Cli {
    /// Settings file (created with defaults if missing)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the card tilts
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter, e.g. `debug` or `flickdeck_core=trace`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Settings::default_path);
    let mut settings = match Settings::load(&config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to load settings: {}. Using defaults.", e);
            Settings::default()
        }
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }

    let _log_guard = init_logging(&settings)?;
    info!(config = %config_path.display(), "starting flickdeck");

    let mut app = App::new(settings, config_path)?;
    let mut terminal = init_terminal()?;

    let result = app.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;

    result
}

/// Logs go to a daily file when enabled; the terminal is in raw mode for the
/// whole session, so there is no console output.
fn init_logging(settings: &Settings) -> Result<Option<WorkerGuard>> {
    if !settings.logging.file_enabled {
        return Ok(None);
    }

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let directory = settings.logging.log_directory();
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&directory, "flickdeck.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor()?;
    Ok(())
}
