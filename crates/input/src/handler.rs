//! Input handler for terminal environments.
//!
//! Movement and rotation fire once per key press. Soft drop is a held
//! intent: a press emits `SoftDropPress` and the matching release emits
//! `SoftDropRelease`. Terminals that never report release get an automatic
//! one after a quiet period without presses or repeats.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEventKind};

use crate::map::{map_key, KeyBinding};
use crate::types::{Intent, SOFT_DROP_RELEASE_TIMEOUT_MS};

/// Tracks the held soft-drop key
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    /// Time since the soft-drop key was last pressed or repeated
    since_soft_drop_ms: u32,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(SOFT_DROP_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(release_timeout_ms: u32) -> Self {
        Self {
            soft_drop_held: false,
            since_soft_drop_ms: 0,
            release_timeout_ms,
        }
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Translate one key event into at most one intent
    pub fn handle_key(&mut self, code: KeyCode, kind: KeyEventKind) -> Option<Intent> {
        let binding = map_key(code)?;
        match (binding, kind) {
            (KeyBinding::SoftDrop, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.since_soft_drop_ms = 0;
                if self.soft_drop_held {
                    None
                } else {
                    self.soft_drop_held = true;
                    Some(Intent::SoftDropPress)
                }
            }
            (KeyBinding::SoftDrop, KeyEventKind::Release) => self.release(),
            // Terminal auto-repeat would otherwise slide the piece across the board.
            (_, KeyEventKind::Repeat | KeyEventKind::Release) => None,
            (KeyBinding::MoveLeft, KeyEventKind::Press) => Some(Intent::MoveLeft),
            (KeyBinding::MoveRight, KeyEventKind::Press) => Some(Intent::MoveRight),
            (KeyBinding::Rotate, KeyEventKind::Press) => Some(Intent::Rotate),
        }
    }

    /// Advance the release timer, emitting any synthesized intents
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, 2> {
        let mut intents = ArrayVec::new();
        if self.soft_drop_held {
            self.since_soft_drop_ms = self.since_soft_drop_ms.saturating_add(elapsed_ms);
            if self.since_soft_drop_ms > self.release_timeout_ms {
                intents.extend(self.release());
            }
        }
        intents
    }

    /// Forget held keys, e.g. after a restart
    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.since_soft_drop_ms = 0;
    }

    fn release(&mut self) -> Option<Intent> {
        if !self.soft_drop_held {
            return None;
        }
        self.reset();
        Some(Intent::SoftDropRelease)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_fires_on_press_only() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(KeyCode::Left, KeyEventKind::Press),
            Some(Intent::MoveLeft)
        );
        assert_eq!(input.handle_key(KeyCode::Left, KeyEventKind::Repeat), None);
        assert_eq!(input.handle_key(KeyCode::Left, KeyEventKind::Release), None);
        assert_eq!(
            input.handle_key(KeyCode::Up, KeyEventKind::Press),
            Some(Intent::Rotate)
        );
    }

    #[test]
    fn soft_drop_press_and_release_edges() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(KeyCode::Down, KeyEventKind::Press),
            Some(Intent::SoftDropPress)
        );
        assert_eq!(input.handle_key(KeyCode::Down, KeyEventKind::Repeat), None);
        assert!(input.soft_drop_held());
        assert_eq!(
            input.handle_key(KeyCode::Down, KeyEventKind::Release),
            Some(Intent::SoftDropRelease)
        );
        assert_eq!(input.handle_key(KeyCode::Down, KeyEventKind::Release), None);
    }

    #[test]
    fn soft_drop_auto_releases_after_timeout() {
        let mut input = InputHandler::with_release_timeout_ms(100);
        input.handle_key(KeyCode::Down, KeyEventKind::Press);

        assert!(input.update(60).is_empty());
        // A repeat refreshes the hold.
        input.handle_key(KeyCode::Down, KeyEventKind::Repeat);
        assert!(input.update(60).is_empty());

        let intents = input.update(60);
        assert_eq!(intents.as_slice(), &[Intent::SoftDropRelease]);
        assert!(!input.soft_drop_held());
        assert!(input.update(500).is_empty());
    }
}
