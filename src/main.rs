mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use controller::AppController;
use model::{AppModel, TmdbClient};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== movie-search starting ===");

    let settings = config::load_settings();
    if !settings.has_token() {
        // Not fatal: every search will fail with an auth error instead
        tracing::warn!(
            "TMDB access token is missing. Set TMDB_TOKEN or access_token in movie-search.toml"
        );
    }
    tracing::debug!(
        api = %settings.api_base_url,
        language = %settings.language,
        include_adult = settings.include_adult,
        "Settings loaded"
    );

    let client = TmdbClient::new(&settings)?;
    let model = Arc::new(Mutex::new(AppModel::new(Duration::from_secs(settings.toast_ttl_secs))));
    let controller = AppController::new(model.clone(), Arc::new(client));
    let view = AppView::new(settings.image_base_url.clone());

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, &view).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("movie-search shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    view: &AppView,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;

        let (session, ui_state, toasts, scroll_locked, should_quit) = {
            let model_guard = model.lock().await;
            model_guard.set_viewport(size.width, size.height).await;
            model_guard.prune_notifications().await;

            (
                model_guard.get_session_snapshot().await,
                model_guard.get_ui_state().await,
                model_guard.get_notifications().await,
                model_guard.is_scroll_locked(),
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            view.render(f, &session, &ui_state, &toasts, scroll_locked);
        })?;

        // Short poll so settled searches show up without waiting for input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse).await,
                _ => {}
            }
        }
    }

    Ok(())
}
