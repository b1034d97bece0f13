use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use jamendo_rs::audio::{HttpSourceLoader, RodioOutput};
use jamendo_rs::catalog::CatalogClient;
use jamendo_rs::config::Config;
use jamendo_rs::controller::AppController;
use jamendo_rs::logging;
use jamendo_rs::model::AppModel;
use jamendo_rs::playback::Player;
use jamendo_rs::share::SystemClipboard;
use jamendo_rs::view::AppView;

const EVENT_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    if !parse_args(std::env::args().skip(1).collect())? {
        return Ok(());
    }

    let config = Config::from_env();
    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(
        api_url = %config.api_url,
        page_size = config.page_size,
        "=== jamendo-rs starting ==="
    );

    // Without an output device there is nothing to play on
    let output = match RodioOutput::new() {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = ?e, "Audio output unavailable");
            eprintln!("Could not open an audio output device: {e:#}");
            return Ok(());
        }
    };

    let http = reqwest::Client::builder()
        .user_agent(concat!("jamendo-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let player = Player::new(
        Box::new(output),
        Arc::new(HttpSourceLoader::new(http.clone())),
    );
    let model = Arc::new(AppModel::new());
    let controller = AppController::new(
        model.clone(),
        player.clone(),
        Arc::new(CatalogClient::new(http, &config)),
        Arc::new(SystemClipboard::new()?),
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let poller = controller.start_progress_poller();

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    poller.abort();
    player.shutdown().await;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("jamendo-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    let mut tick: usize = 0;

    loop {
        let size = terminal.size()?;
        model
            .set_grid_metrics(AppView::grid_metrics(Rect::new(0, 0, size.width, size.height)))
            .await;

        // Infinite scroll, including the very first page
        controller.maybe_load_more().await;

        // Auto-clear old toasts
        model.auto_clear_old_toasts().await;

        let grid = model.grid_view().await;
        let ui_state = model.get_ui_state().await;
        let transport = model.get_transport().await;

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &grid, &ui_state, &transport, tick / 2);
        })?;
        tick = tick.wrapping_add(1);

        if event::poll(EVENT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}

/// Returns whether the application should start.
fn parse_args(args: Vec<String>) -> Result<bool> {
    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(false);
            }
            "-V" | "--version" => {
                println!("jamendo-rs {}", env!("CARGO_PKG_VERSION"));
                return Ok(false);
            }
            other => anyhow::bail!("unknown argument {other} (see --help)"),
        }
    }
    Ok(true)
}

fn print_help() {
    println!("jamendo-rs {}", env!("CARGO_PKG_VERSION"));
    println!("Browse and play free music from the Jamendo catalog.");
    println!();
    println!("  -h, --help        Show this help");
    println!("  -V, --version     Show the version");
    println!();
    println!("Environment:");
    println!("  JAMENDO_CLIENT_ID   API client id");
    println!("  JAMENDO_API_URL     API base URL");
    println!("  JAMENDO_PAGE_SIZE   Tracks per page (1-200)");
    println!("  JAMENDO_LOG_DIR     Log directory (default .logs)");
    println!("  RUST_LOG            Log filter");
}
