//! Terminal runner (default binary).
//!
//! `blockfall` plays in the terminal; `blockfall headless` runs a scripted
//! session and prints the final snapshot and event log as JSON.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::cli::{parse_args, Command, HeadlessOptions};
use blockfall::core::{GameConfig, GameState};
use blockfall::headless;
use blockfall::input::{should_quit, should_restart, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Play(config) => play(config),
        Command::Headless(opts) => run_headless(&opts),
    }
}

fn run_headless(opts: &HeadlessOptions) -> Result<()> {
    let report = headless::run(opts)?;
    let out = serde_json::json!({
        "snapshot": report.snapshot,
        "events": report.events,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn play(config: GameConfig) -> Result<()> {
    let mut game = GameState::new(config)?;
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to enter raw terminal mode")?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut input = InputHandler::new();
    let mut status: Option<&'static str> = None;

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), status, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_restart(key) {
                        input.reset();
                        game.restart();
                    } else if let Some(intent) = input.handle_key(key.code, key.kind) {
                        game.apply_intent(intent);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;

            for intent in input.update(elapsed_ms) {
                game.apply_intent(intent);
            }
            game.step(elapsed_ms);

            if let Some(event) = game.take_events().last() {
                status = Some(event.label());
            }
        }
    }
}
