//! # TaskSense
//!
//! Terminal client for the TaskSense task service.
//!
//! ## Usage
//!
//! ```bash
//! TASKSENSE_SERVICE_URL=... TASKSENSE_SERVICE_KEY=... TASKSENSE_CLASSIFIER_URL=... tasksense
//! ```
//!
//! Configuration is read from the environment (a `.env` file is honored).
//! Logs go to `TASKSENSE_LOG_FILE` when set; stdout is reserved for the UI.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasksense_client::classify::{HttpClassifier, TaskClassifier};
use tasksense_client::config::Config;
use tasksense_client::ServiceClient;
use tasksense_tui::app::{App, Screen};
use tasksense_tui::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_file.as_deref())?;

    tracing::info!("TaskSense v{} starting", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(ServiceClient::new(&config));
    let classifier: Arc<dyn TaskClassifier> = Arc::new(HttpClassifier::new(&config.classifier));
    let mut app = App::new(client, classifier);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Sets up file logging. When no log file is configured tracing stays
/// uninitialized, so nothing ever writes over the alternate screen.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let path = match log_file {
        Some(path) => path,
        None => return Ok(()),
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasksense=info,tasksense_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // First frame shows the loading screen, then the stored session is
        // restored and the real screen takes over.
        if app.screen == Screen::Loading {
            app.bootstrap().await;
            continue;
        }

        app.on_tick().await;

        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key).await;
            }
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
