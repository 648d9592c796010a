use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::{Handle, Runtime};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use pulsewatch::data::duration::format_duration;
use pulsewatch::data::export::write_export;
use pulsewatch::{events, source_from_settings, ui, App, DataSource, Overrides, Settings};

/// How long the UI loop waits for input before redrawing.
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "pulsewatch", version)]
#[command(about = "Terminal dashboard for today's heart rate, sleep and step count")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vendor API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the vendor API
    #[arg(long)]
    token: Option<String>,

    /// Show synthetic data instead of calling the API
    #[arg(long, conflicts_with = "live")]
    mock: bool,

    /// Fetch data from the vendor API
    #[arg(long)]
    live: bool,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Export one snapshot to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Log file (the dashboard owns the terminal)
    #[arg(long, default_value = "pulsewatch.log")]
    log_file: PathBuf,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let use_mock = match (self.mock, self.live) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Overrides {
            base_url: self.base_url.clone(),
            access_token: self.token.clone(),
            use_mock,
            refresh_interval: self.refresh.map(|secs| format!("{}s", secs)),
            request_timeout: self.timeout.map(|secs| format!("{}s", secs)),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Export mode logs to stderr; the TUI needs the terminal to itself
    let log_file = args.export.is_none().then_some(args.log_file.as_path());
    init_tracing(log_file)?;

    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    info!(
        mock = settings.use_mock,
        interval = %format_duration(settings.refresh_interval),
        "settings loaded"
    );

    let rt = Runtime::new()?;
    let source = source_from_settings(&settings)?;

    if let Some(export_path) = args.export {
        return export_to_file(&rt, source.as_ref(), &export_path);
    }

    run_tui(source, rt.handle().clone(), &settings)
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pulsewatch=info,pulsewatch_adapters=info"));
    let builder = fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Produce one snapshot and write it to a JSON file
fn export_to_file(rt: &Runtime, source: &dyn DataSource, export_path: &Path) -> Result<()> {
    let snapshot = rt.block_on(source.produce());
    write_export(&snapshot, export_path)?;

    info!(path = %export_path.display(), source = source.description(), "exported snapshot");
    println!("Exported health snapshot to: {}", export_path.display());
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Arc<dyn DataSource>, runtime: Handle, settings: &Settings) -> Result<()> {
    // Detect the background before raw mode takes over the terminal
    let mut app = App::new(source, runtime, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal. Refresh tasks panic on runtime
    // worker threads; the scheduler reports those, so only log them here.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        if std::thread::current().name() != Some("main") {
            error!(%panic, "refresh task panicked");
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);
    if let Err(ref e) = result {
        error!(error = %e, "dashboard loop failed");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(TICK)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drive the refresh timer and pick up finished refreshes
        app.update();
    }

    info!("shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        let args = Args::parse_from(["pulsewatch", "--live", "--refresh", "30"]);
        let overrides = args.overrides();
        assert_eq!(overrides.use_mock, Some(false));
        assert_eq!(overrides.refresh_interval.as_deref(), Some("30s"));

        let args = Args::parse_from(["pulsewatch"]);
        assert_eq!(args.overrides().use_mock, None);
    }

    #[test]
    fn test_mock_conflicts_with_live() {
        assert!(Args::try_parse_from(["pulsewatch", "--mock", "--live"]).is_err());
    }
}
