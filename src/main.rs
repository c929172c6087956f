//! Terminal Logic Gate Challenge (default binary).
//!
//! Wall-clock time is fed to the session as simulated milliseconds; the
//! session's scheduler decides when ticks and spawns happen. Rendering goes
//! through the framebuffer renderer (no widget framework).

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use tui_gates::config::AppConfig;
use tui_gates::core::GameSnapshot;
use tui_gates::engine::Session;
use tui_gates::input::{handle_key_event, should_quit};
use tui_gates::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Toasts, Viewport};
use tui_gates::types::{GameCommand, TICK_MS};

/// Longest stretch of wall time applied in one step (e.g. after a suspend).
const MAX_CATCH_UP_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config)?;
    info!("starting with seed {}", config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!("terminal restore failed: {e:#}");
    }
    if let Err(e) = &result {
        warn!("exiting with error: {e:#}");
    }
    result
}

/// Log to `GATES_LOG_PATH` when set. The terminal owns stdout/stderr.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut session = Session::new(config.seed);
    let view = GameView::default();
    let mut toasts = Toasts::new(config.toast_ms);

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut events = Vec::new();

    let frame = Duration::from_millis(TICK_MS as u64);
    let clock = Instant::now();
    let mut fed_ms: u64 = 0;

    loop {
        // Simulated time catches up with the wall clock.
        let now_ms = clock.elapsed().as_millis() as u64;
        let delta = now_ms.saturating_sub(fed_ms).min(MAX_CATCH_UP_MS);
        fed_ms = now_ms;
        session.advance(delta as u32)?;

        session.drain_events_into(&mut events);
        for ev in events.drain(..) {
            toasts.push_event(&ev, now_ms);
        }
        toasts.expire(now_ms);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        let overlay = Overlay {
            last_key: session.last_key(),
            toasts: Some(&toasts),
        };
        view.render_into(&snap, &overlay, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one tick.
        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!("quit at score {}", session.state().score());
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameCommand::Start) if !session.state().is_playing() => {
                        toasts.clear();
                        session.start()?;
                    }
                    Some(GameCommand::Press(kind)) => {
                        session.press(kind)?;
                    }
                    _ => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
