//! Scripted session without a terminal.

use crate::cli::HeadlessOptions;
use crate::core::{ConfigError, GameEvent, GameSnapshot, GameState};

/// Result of a headless run
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub snapshot: GameSnapshot,
    pub events: Vec<GameEvent>,
}

/// Play `opts.steps` steps, feeding one scripted intent before each step
///
/// Stops early once the game is lost.
pub fn run(opts: &HeadlessOptions) -> Result<HeadlessReport, ConfigError> {
    let mut game = GameState::new(opts.config.clone())?;
    game.start();

    let mut events = game.take_events();
    let mut script = opts.intents.iter();
    for _ in 0..opts.steps {
        if let Some(&intent) = script.next() {
            game.apply_intent(intent);
        }
        game.step(opts.step_ms);
        events.extend(game.take_events());
        if game.lost() {
            break;
        }
    }

    Ok(HeadlessReport {
        snapshot: game.snapshot(),
        events,
    })
}
