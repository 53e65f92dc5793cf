//! Terminal runner (default binary).
//!
//! Crossterm for input and a framebuffer-based renderer. Gravity is driven by
//! wall-clock time passed to `advance` once per frame.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::config::RunConfig;
use blockfall::core::{GameEngine, GameSnapshot};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    if let Some(path) = &config.log_file {
        logging::init_file(path)?;
    }
    info!("starting blockfall (seed {})", config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!("failed to restore terminal: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut engine = GameEngine::new(config.seed);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let mut last_frame = Instant::now();
    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        let timeout = config.frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested, final score {}", engine.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let now = Instant::now();
        engine.advance(now.duration_since(last_frame).as_secs_f64());
        last_frame = now;
    }
}
