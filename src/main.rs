// src/main.rs

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

mod app;
mod config;
mod core;
mod logging;
mod router;
mod ui;

use crate::app::{App, Page};
use crate::config::{Cli, Mode, Settings};
use crate::core::client::ScanClient;
use crate::core::view_model::{ScanCompletion, ScanTicket};
use crate::router::Route;

const PAGE_SCROLL: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = Cli::parse().into_settings()?;
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), endpoint = %settings.endpoint, "Starting.");

    let client = ScanClient::new(settings.endpoint.clone(), settings.timeout)?;

    match settings.mode {
        Mode::Print => print_page(&settings, &client).await,
        Mode::Interactive => run_interactive(&settings, client).await,
    }
}

/// Renders the requested route once, waiting for its scan if it starts one.
async fn print_page(settings: &Settings, client: &ScanClient) -> Result<()> {
    let mut app = App::new();
    if let Some(ticket) = app.navigate(settings.route.clone()) {
        let outcome = client.scan(&ticket.domain).await;
        app.complete_scan(ScanCompletion { id: ticket.id, outcome });
    }
    print!("{}", ui::plain::render_page(&app));

    match app.scan_view_model().and_then(|vm| vm.error()) {
        Some(message) => Err(eyre!("{message}")),
        None => Ok(()),
    }
}

async fn run_interactive(settings: &Settings, client: ScanClient) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, settings, client).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    client: ScanClient,
) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel(8);

    if let Some(ticket) = app.navigate(settings.route.clone()) {
        spawn_scan(&client, ticket, &tx);
    }
    let mut title = String::new();

    while !app.should_quit {
        if title != app.route.title() {
            title = app.route.title();
            stdout().execute(SetTitle(&title))?;
        }

        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Some(ticket) = handle_events(&mut app)? {
                spawn_scan(&client, ticket, &tx);
            }
        } else {
            app.on_tick();
        }

        while let Ok(completion) = rx.try_recv() {
            app.complete_scan(completion);
        }
    }

    Ok(())
}

/// Runs the fetch in the background and reports back to the event loop.
fn spawn_scan(client: &ScanClient, ticket: ScanTicket, tx: &mpsc::Sender<ScanCompletion>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.scan(&ticket.domain).await;
        if tx.send(ScanCompletion { id: ticket.id, outcome }).await.is_err() {
            error!(id = ticket.id, "Event loop gone before the scan finished.");
        }
    });
}

/// Single entry point for terminal events. Returns a scan to start, if any.
fn handle_events(app: &mut App) -> Result<Option<ScanTicket>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(handle_key(app, key));
        }
    }
    Ok(None)
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<ScanTicket> {
    match key.code {
        KeyCode::Esc => {
            app.quit();
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return None;
        }
        KeyCode::Tab | KeyCode::BackTab => return app.next_tab(),
        _ => {}
    }

    if matches!(app.page, Page::Home) {
        handle_home_input(app, key.code)
    } else {
        handle_scan_input(app, key.code)
    }
}

fn handle_home_input(app: &mut App, key_code: KeyCode) -> Option<ScanTicket> {
    match key_code {
        KeyCode::Enter | KeyCode::Char('s') => app.navigate(Route::Scan { domain: None }),
        KeyCode::Char('q') => {
            app.quit();
            None
        }
        _ => None,
    }
}

fn handle_scan_input(app: &mut App, key_code: KeyCode) -> Option<ScanTicket> {
    match key_code {
        KeyCode::Enter => return app.submit_scan(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE_SCROLL),
        KeyCode::PageDown => app.scroll_down(PAGE_SCROLL),
        _ => {}
    }
    None
}
