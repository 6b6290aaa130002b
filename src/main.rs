//! Terminal game runner.
//!
//! The explicit driver loop: poll input with a frame timeout, apply mapped
//! actions, feed elapsed time to the engine while it is running, render the
//! snapshot. The engine never schedules anything itself, and ticking is
//! gated here while paused.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use stackfall::core::{GameConfig, GameEngine};
use stackfall::input::{map_key_event, should_quit};
use stackfall::term::{GameView, TerminalRenderer};
use stackfall::types::{Phase, FRAME_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0)
        .wrapping_add(std::process::id());
    let mut engine = GameEngine::new(GameConfig::default(), seed);
    engine.start();

    let view = GameView;
    let mut frame = Vec::with_capacity(32 * 1024);

    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        frame.clear();
        view.encode(&engine.snapshot(), &mut frame)?;
        term.draw(&frame)?;

        let timeout = frame_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = map_key_event(key) {
                        engine.apply_action(action);
                    }
                }
            }
        }

        if last_tick.elapsed() >= frame_duration {
            let elapsed = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();

            // The driver, not the engine, gates time while paused.
            if engine.phase() == Phase::Running {
                engine.tick(elapsed);
            }
        }
    }
}
