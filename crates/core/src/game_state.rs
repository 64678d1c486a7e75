//! Game state module - the game session
//!
//! This module ties together the board, the live piece, and the scheduled
//! tasks that drive gravity and line clears.
//!
//! Lifecycle of a piece:
//!
//! `Falling -> (lock) -> Clearing? -> Spawning -> Falling`
//!
//! - A repeating fall tick moves the piece down one row; when the row below
//!   is blocked the tick locks the piece instead.
//! - Locking merges the cells into the board and drops the piece.
//! - Full rows are marked and blink for `clear_delay_ms`, then a one-shot task
//!   removes them and spawns the next piece.
//! - With nothing to clear a zero-delay one-shot spawns the next piece, so
//!   the continuation always runs on a later step.
//! - A spawn that overlaps the stack, or a lock above the top row, ends the
//!   game for good.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use crate::board::{Block, Board};
use crate::collision::collides;
use crate::config::{ConfigError, GameConfig};
use crate::events::{GameEvent, LossReason};
use crate::piece::{Piece, PieceCells};
use crate::rotation::try_rotate;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::shapes::RotationState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{ColorFrame, Intent};

/// Events kept between drains; older ones are dropped first
pub const EVENT_LOG_CAP: usize = 64;

/// Where the session is in the piece lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Constructed, not started
    Idle,
    Falling,
    /// Full rows are blinking; no live piece
    Clearing,
    /// Waiting for the deferred spawn; no live piece
    Spawning,
    Lost,
}

/// Work items on the session scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameTask {
    Fall,
    FinishClear,
    Spawn,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    spawn_states: Arc<[RotationState]>,
    board: Board,
    active: Option<Piece>,
    phase: Phase,
    /// Rows marked during the current clear, ascending
    clearing_rows: Vec<usize>,
    scheduler: Scheduler<GameTask>,
    fall_task: Option<TaskHandle>,
    /// Interval of the installed fall tick
    fall_interval_ms: u32,
    soft_drop_held: bool,
    lost: bool,
    won: bool,
    /// Monotonic id of spawned pieces
    piece_id: u32,
    /// Undrained events, at most [`EVENT_LOG_CAP`]
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a session on an empty board
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let board = Board::new(config.width, config.height);
        Self::with_board(config, board)
    }

    /// Create a session on a pre-filled board
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(ConfigError::BoardMismatch {
                width: config.width,
                height: config.height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        let spawn_states = config
            .shapes
            .shared(config.spawn_kind)
            .ok_or(ConfigError::MissingShape(config.spawn_kind))?;

        Ok(Self {
            fall_interval_ms: config.base_fall_ms,
            config,
            spawn_states,
            board,
            active: None,
            phase: Phase::Idle,
            clearing_rows: Vec::new(),
            scheduler: Scheduler::new(),
            fall_task: None,
            soft_drop_held: false,
            lost: false,
            won: false,
            piece_id: 0,
            events: VecDeque::with_capacity(EVENT_LOG_CAP),
        })
    }

    /// Spawn the first piece and start gravity
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.spawn_piece();
    }

    /// Throw away the board and start over
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.board.clear();
        self.active = None;
        self.clearing_rows.clear();
        self.fall_task = None;
        self.fall_interval_ms = self.config.base_fall_ms;
        self.soft_drop_held = false;
        self.lost = false;
        self.won = false;
        self.phase = Phase::Idle;
        self.events.clear();
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn width(&self) -> u16 {
        self.board.width()
    }

    pub fn height(&self) -> u16 {
        self.board.height()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Color of the locked block at `(row, col)`
    pub fn cell(&self, row: i32, col: i32) -> Option<ColorFrame> {
        self.board.get(row, col)
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn active_cells(&self) -> Option<PieceCells> {
        self.active.as_ref().map(Piece::absolute_cells)
    }

    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    /// Whether `row` is marked for removal and should flash
    pub fn is_blinking(&self, row: usize) -> bool {
        self.clearing_rows.contains(&row)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn lost(&self) -> bool {
        self.lost
    }

    /// Always false: this mode has no win condition
    pub fn won(&self) -> bool {
        self.won
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Gravity interval: the installed fall tick's, or the one the next
    /// spawn will install while no piece is falling
    pub fn fall_interval_ms(&self) -> u32 {
        if self.fall_task.is_some() {
            self.fall_interval_ms
        } else {
            self.desired_fall_interval()
        }
    }

    /// Virtual time consumed by [`GameState::step`]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Take the events recorded since the last call, oldest first
    ///
    /// Only the latest [`EVENT_LOG_CAP`] are kept between calls.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_LOG_CAP {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let height = self.board.height() as usize;
        let board = (0..height)
            .map(|row| self.board.row_cells(row).unwrap_or_default().to_vec())
            .collect();

        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board,
            clearing_rows: self.clearing_rows.clone(),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            phase: self.phase,
            lost: self.lost,
            won: self.won,
            piece_id: self.piece_id,
            fall_interval_ms: self.fall_interval_ms(),
            soft_drop_held: self.soft_drop_held,
            now_ms: self.scheduler.now_ms(),
        }
    }

    /// Advance the session clock and run every task that comes due
    ///
    /// Called by the host's frame or timer loop. No-op before `start` and
    /// after the game is lost.
    pub fn step(&mut self, elapsed_ms: u32) {
        if self.lost || self.phase == Phase::Idle {
            return;
        }

        self.scheduler.advance(elapsed_ms);
        while let Some((handle, task)) = self.scheduler.pop_due() {
            match task {
                GameTask::Fall => {
                    if self.fall_task == Some(handle) {
                        self.on_fall_tick();
                    }
                }
                GameTask::FinishClear => self.finish_clear(),
                GameTask::Spawn => {
                    self.spawn_piece();
                }
            }
            if self.lost {
                break;
            }
        }
    }

    /// Apply a player intent
    ///
    /// Returns whether anything changed. Blocked moves and rotations are
    /// silently rejected.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::Rotate => self.rotate(),
            Intent::SoftDropPress => self.set_soft_drop(true),
            Intent::SoftDropRelease => self.set_soft_drop(false),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Rotate clockwise, kicking one column left or right if needed
    pub fn rotate(&mut self) -> bool {
        if self.lost {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        try_rotate(piece, &self.board).is_some()
    }

    /// Hold or release the soft drop
    ///
    /// Pressing switches gravity to the accelerated interval right away.
    /// Releasing takes effect at the next fall tick.
    pub fn set_soft_drop(&mut self, held: bool) -> bool {
        if self.lost || self.soft_drop_held == held {
            return false;
        }
        self.soft_drop_held = held;
        if held && self.fall_task.is_some() {
            self.accelerate_fall();
        }
        true
    }

    fn try_shift(&mut self, d_col: i32) -> bool {
        if self.lost {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if collides(&self.board, &piece.translated_cells(d_col, 0)) {
            return false;
        }
        piece.translate(d_col, 0);
        true
    }

    fn desired_fall_interval(&self) -> u32 {
        if self.soft_drop_held {
            self.config.soft_drop_fall_ms
        } else {
            self.config.base_fall_ms
        }
    }

    /// Replace the fall tick; the old one can no longer fire
    fn install_fall_tick(&mut self, first_delay_ms: u32, interval_ms: u32) {
        self.cancel_fall_tick();
        self.fall_task = Some(self.scheduler.schedule_repeating_after(
            GameTask::Fall,
            first_delay_ms,
            interval_ms,
        ));
        self.fall_interval_ms = interval_ms;
    }

    fn cancel_fall_tick(&mut self) {
        if let Some(handle) = self.fall_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Switch to the soft drop interval, keeping the pending tick's slot
    ///
    /// The next tick fires at whichever is sooner: the tick that was already
    /// pending or one accelerated interval from now.
    fn accelerate_fall(&mut self) {
        let interval = self.config.soft_drop_fall_ms;
        if self.fall_interval_ms == interval {
            return;
        }
        let now = self.scheduler.now_ms();
        let first_delay = self
            .fall_task
            .and_then(|handle| self.scheduler.due_ms(handle))
            .map_or(interval, |due| {
                due.saturating_sub(now).min(interval as u64) as u32
            });
        self.install_fall_tick(first_delay, interval);
    }

    fn on_fall_tick(&mut self) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        if collides(&self.board, &piece.translated_cells(0, -1)) {
            self.lock_piece();
            return;
        }
        piece.translate(0, -1);

        let desired = self.desired_fall_interval();
        if desired != self.fall_interval_ms {
            self.install_fall_tick(desired, desired);
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.cancel_fall_tick();

        let cells = piece.absolute_cells();
        let blocks = cells.map(|pos| Block::new(pos, piece.color()));
        let in_bounds = self.board.place(&blocks);
        self.push_event(GameEvent::Locked {
            piece_id: self.piece_id,
            cells,
        });
        if !in_bounds {
            self.enter_lost(LossReason::LockedAboveBoard);
            return;
        }

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.phase = Phase::Spawning;
            self.scheduler.schedule_once(GameTask::Spawn, 0);
        } else {
            self.phase = Phase::Clearing;
            self.push_event(GameEvent::RowsMarked { rows: rows.clone() });
            self.clearing_rows = rows;
            self.scheduler
                .schedule_once(GameTask::FinishClear, self.config.clear_delay_ms);
        }
    }

    fn finish_clear(&mut self) {
        let rows = std::mem::take(&mut self.clearing_rows);
        self.board.remove_rows(&rows);
        self.push_event(GameEvent::RowsCleared { rows });
        self.spawn_piece();
    }

    fn spawn_piece(&mut self) -> bool {
        let anchor = self.config.spawn_anchor();
        let Some(piece) = Piece::new(
            self.config.spawn_kind,
            Arc::clone(&self.spawn_states),
            anchor,
            self.config.spawn_color,
        ) else {
            // Construction validated the spawn shape.
            return false;
        };
        if collides(&self.board, &piece.absolute_cells()) {
            self.enter_lost(LossReason::SpawnBlocked);
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        self.push_event(GameEvent::Spawned {
            piece_id: self.piece_id,
            kind: piece.kind(),
            anchor,
        });
        self.active = Some(piece);
        self.phase = Phase::Falling;

        let interval = self.desired_fall_interval();
        self.install_fall_tick(interval, interval);
        true
    }

    fn enter_lost(&mut self, reason: LossReason) {
        self.lost = true;
        self.phase = Phase::Lost;
        self.active = None;
        self.fall_task = None;
        self.scheduler.cancel_all();
        self.push_event(GameEvent::Lost { reason });
    }
}
