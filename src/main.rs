use std::fs::File;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use watchlist::api::ApiClient;
use watchlist::config::fetch_config;
use watchlist::tls::build_tls_config;
use watchlist::tui::actions::spawn_action;
use watchlist::tui::event::{spawn_event_reader, spawn_refresh_timer, spawn_tick_timer};
use watchlist::tui::terminal::ring_bell;
use watchlist::tui::{self, Action, App, Message, RefreshTask, Tui};
use watchlist::websocket::ConnectionManager;
use watchlist::{Result, WatchlistError};

/// UI tick period, used to expire notifications.
const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = fetch_config()?;
    let tls_config = Arc::new(build_tls_config(config.server.ca_file.as_deref())?);
    let api = ApiClient::new(config.server.origin.clone(), tls_config.clone())?;
    info!(origin = %api.origin(), "Starting watchlist client");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut terminal = tui::setup_terminal()?;

    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);
    spawn_refresh_timer(tx.clone(), RefreshTask::SummaryRefresh, config.refresh.summary_interval);
    spawn_refresh_timer(tx.clone(), RefreshTask::Resync, config.refresh.resync_interval);

    let manager = ConnectionManager::new(
        config.server.origin.clone(),
        tls_config,
        config.refresh.reconnect_delay,
        tx.clone(),
    );
    tokio::spawn(manager.run());

    spawn_action(&api, Action::LoadAll, tx.clone());

    let mut app = App::new(config.ui.sound_enabled);
    let result = run(&mut terminal, &mut app, &mut rx, &api, &tx).await;

    tui::restore_terminal(&mut terminal)?;
    info!("Watchlist client stopped");
    result
}

/// Draws, waits for the next message, applies it, and runs any resulting action.
async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<Message>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| WatchlistError::Io(format!("failed to draw: {e}")))?;

        if app.take_bell()
            && let Err(e) = ring_bell(terminal)
        {
            warn!("{e}");
        }

        let Some(message) = rx.recv().await else {
            return Ok(());
        };

        if let Some(action) = tui::update(app, message) {
            spawn_action(api, action, tx.clone());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Sends logs to `WATCHLIST_LOG_FILE`, or discards them; the terminal
/// belongs to the UI.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var("WATCHLIST_LOG_FILE").ok().filter(|p| !p.trim().is_empty()) {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| WatchlistError::Io(format!("cannot create log file {path}: {e}")))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}
