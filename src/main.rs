//! ShoreSquad - beach cleanup forecast widget
//!
//! A terminal UI that shows a cached multi-day weather forecast, plus one-shot
//! commands for printing the forecast and managing saved events.

mod app;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::error;

use app::{App, ForecastPanel};
use shoresquad::cache::FileStore;
use shoresquad::cli::{Cli, Command, Settings};
use shoresquad::data::{ForecastClient, ForecastSource};
use shoresquad::logging;
use shoresquad::refresh::ForecastWidget;
use shoresquad::render::{ForecastView, RenderedEntry, RenderedView};
use shoresquad::saved::SavedEvents;

type Widget<V> = ForecastWidget<ForecastClient<FileStore>, V>;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Collects a single rendered view for the `print` command
#[derive(Debug, Default)]
struct CapturedView {
    summary: String,
    entries: Vec<RenderedEntry>,
}

impl ForecastView for CapturedView {
    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn set_entries(&mut self, entries: Vec<RenderedEntry>) {
        self.entries = entries;
    }

    fn set_refresh_label(&mut self, _label: &str) {}
}

fn build_client(settings: &Settings) -> Result<ForecastClient<FileStore>, reqwest::Error> {
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout)
        .build()?;
    Ok(ForecastClient::with_client(
        http_client,
        settings.endpoint.clone(),
        FileStore::with_dir(settings.cache_dir.clone()),
    ))
}

async fn print_forecast(
    settings: &Settings,
    html: bool,
    refresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(settings)?;
    if refresh {
        client.invalidate_cache();
    }

    let widget = ForecastWidget::new(client, CapturedView::default());
    widget.load().await;

    let view = {
        let captured = widget.view();
        RenderedView {
            summary: captured.summary.clone(),
            entries: captured.entries.clone(),
        }
    };
    if html {
        println!("{}", view.to_html());
    } else {
        println!("{}", view.to_text());
    }
    Ok(())
}

fn toggle_saved(settings: &Settings, event_id: &str) -> io::Result<()> {
    let saved = SavedEvents::new(FileStore::with_dir(settings.cache_dir.clone()));
    if saved.toggle(event_id)? {
        println!("Saved {}", event_id);
    } else {
        println!("Removed {}", event_id);
    }
    Ok(())
}

fn list_saved(settings: &Settings) {
    let saved = SavedEvents::new(FileStore::with_dir(settings.cache_dir.clone()));
    for event_id in saved.list() {
        println!("{}", event_id);
    }
}

async fn run_tui(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let widget: Arc<Widget<ForecastPanel>> = Arc::new(ForecastWidget::new(
        build_client(settings)?,
        ForecastPanel::default(),
    ));

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // Page-load fetch runs in the background so the loading state is drawn
    let initial = Arc::clone(&widget);
    tokio::spawn(async move {
        initial.load().await;
    });

    // Main event loop
    loop {
        {
            let panel = widget.view();
            app.clamp_scroll(panel.entries.len());
            terminal.draw(|f| {
                ui::render_forecast(f, &app, &panel);
                if app.show_help {
                    ui::render_help_overlay(f);
                }
            })?;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.take_refresh_request() {
            let refreshing = Arc::clone(&widget);
            tokio::spawn(async move {
                refreshing.refresh().await;
            });
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    match &settings.command {
        None => {
            logging::init_file(&settings.cache_dir)?;
            if let Err(e) = run_tui(&settings).await {
                error!(error = %e, "terminal UI exited with an error");
                return Err(e);
            }
        }
        Some(Command::Print { html, refresh }) => {
            logging::init_stderr();
            print_forecast(&settings, *html, *refresh).await?;
        }
        Some(Command::Save { event_id }) => {
            logging::init_stderr();
            toggle_saved(&settings, event_id)?;
        }
        Some(Command::Saved) => {
            logging::init_stderr();
            list_saved(&settings);
        }
    }

    Ok(())
}
