pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{
    io::{self, Stdout},
    path::Path,
};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::settings::{RuntimeSettings, load_runtime_settings};
use app::state::AppState;
use cli::Cli;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

/// Simulated time before a snapshot is taken, so particles have left their
/// spawn positions.
const SNAPSHOT_WARMUP_SECS: f32 = 1.0;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let (settings, path) = load_runtime_settings(&cli);
    if let Some(path) = &path {
        log::debug!("settings file {}", path.display());
    }

    if let Some(path) = cli.snapshot.clone() {
        return run_snapshot(&cli, settings, &path).await;
    }
    if cli.one_shot {
        let line = run_one_shot(&cli, settings).await;
        println!("{line}");
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli, settings).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Resolves the current weather once and returns the status line.
pub async fn run_one_shot(cli: &Cli, settings: RuntimeSettings) -> String {
    let mut app = AppState::new(cli, settings);
    app.refresh_now().await;
    app.status_line()
}

/// Resolves the current weather, simulates a short warm-up and writes the
/// frame to `path` as a PNG.
pub async fn run_snapshot(cli: &Cli, settings: RuntimeSettings, path: &Path) -> Result<()> {
    let mut app = AppState::new(cli, settings);
    app.refresh_now().await;
    app.resize_surface(cli.width as usize, cli.height as usize);

    let fps = app.settings.fps.max(1);
    let dt = 1.0 / f32::from(fps);
    let frames = (SNAPSHOT_WARMUP_SECS * f32::from(fps)).round() as usize;
    for _ in 0..frames {
        app.advance_frame(dt);
    }

    ui::snapshot::write_png(app.surface(), path)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    log::info!("wrote {} ({})", path.display(), app.resolved().state_key);
    Ok(())
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: &Cli,
    settings: RuntimeSettings,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(cli, settings);

    let size = terminal.size()?;
    app.resize_viewport(size.width, size.height);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
