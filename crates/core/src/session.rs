//! Game session - the controller that owns one game's state and drives its rules
//!
//! A [`GameSession`] owns the board, the falling and queued pieces, score, level and the
//! duo countdown. It is driven from two directions:
//!
//! - **Commands** from the player via [`GameSession::apply_action`] (or the individual
//!   methods it dispatches to).
//! - **Timer fires** from its [`Scheduler`], delivered through [`GameSession::on_timer`]
//!   (or [`GameSession::pump`], which drains every due timer).
//!
//! Every operation is total. A command that does not apply to the current state returns
//! `false` and changes nothing.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{GameAction, GameMode, SessionState};
//!
//! let mut session = GameSession::seeded(12345);
//! session.start_game(GameMode::Solo);
//! assert_eq!(session.state(), SessionState::Running);
//!
//! let y = session.active().unwrap().y;
//! session.advance(Duration::from_secs(1));
//! assert_eq!(session.active().unwrap().y, y + 1);
//!
//! session.apply_action(GameAction::HardDrop);
//! assert!(session.board().filled_count() > 0);
//! ```

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::collision::{check_collision, landing_position, try_rotate};
use crate::config::EngineConfig;
use crate::pieces::Piece;
use crate::rng::{PieceSource, Randomizer};
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerKind};
use crate::scoring::{fall_interval_for_level, level_after_lines, line_clear_points, scoring_level};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{
    GameAction, GameMode, SessionState, ShapeKind, COUNTDOWN_TICK_MS, STARTING_LEVEL,
};

/// What happened the last time a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// Level reached by this lock, if it leveled up.
    pub new_level: Option<u32>,
}

/// One game, from mode selection to game over.
#[derive(Debug, Clone)]
pub struct GameSession<S: Scheduler = ManualScheduler, P: PieceSource = Randomizer> {
    config: EngineConfig,
    scheduler: S,
    source: P,
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    mode: Option<GameMode>,
    /// Mode used by restart; solo until a mode is picked.
    last_mode: GameMode,
    state: SessionState,
    score: u32,
    level: u32,
    lines: u32,
    time_remaining: u32,
    fall_interval: Duration,
    fall_timer: Option<TimerHandle>,
    countdown_timer: Option<TimerHandle>,
    last_event: Option<LockEvent>,
}

impl GameSession<ManualScheduler, Randomizer> {
    /// Default config, virtual clock, seeded uniform randomizer.
    pub fn seeded(seed: u32) -> Self {
        Self::new(
            EngineConfig::default(),
            ManualScheduler::new(),
            Randomizer::new(seed),
        )
    }
}

impl<S: Scheduler, P: PieceSource> GameSession<S, P> {
    /// New session in `NotStarted`, with the first piece already queued.
    pub fn new(config: EngineConfig, scheduler: S, mut source: P) -> Self {
        let next = Some(source.next_piece());
        let fall_interval = config.initial_fall_interval(GameMode::Solo);
        Self {
            config,
            scheduler,
            source,
            board: Board::new(),
            active: None,
            next,
            mode: None,
            last_mode: GameMode::Solo,
            state: SessionState::NotStarted,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            time_remaining: 0,
            fall_interval,
            fall_timer: None,
            countdown_timer: None,
            last_event: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Mode of the current game, `None` before the first start.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn last_mode(&self) -> GameMode {
        self.last_mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Seconds left on the duo countdown (always 0 in solo).
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (tests, puzzles).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Live fall timer handle, if armed.
    pub fn fall_timer(&self) -> Option<TimerHandle> {
        self.fall_timer
    }

    /// Live countdown timer handle, if armed.
    pub fn countdown_timer(&self) -> Option<TimerHandle> {
        self.countdown_timer
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would land on.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active
            .map(|piece| landing_position(&piece, &self.board).y)
    }

    /// Begin a fresh game in `mode`, from any state.
    pub fn start_game(&mut self, mode: GameMode) {
        self.cancel_timers();

        self.mode = Some(mode);
        self.last_mode = mode;
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = STARTING_LEVEL;
        self.fall_interval = self.config.initial_fall_interval(mode);
        self.time_remaining = match mode {
            GameMode::Solo => 0,
            GameMode::Duo => self.config.duo_time_limit_secs,
        };
        self.active = None;
        self.last_event = None;
        self.state = SessionState::Running;

        info!(
            mode = mode.as_str(),
            fall_interval_ms = self.fall_interval.as_millis() as u64,
            "game started"
        );

        if self.spawn_next() {
            self.arm_timers();
        }
    }

    /// Start again with the most recently selected mode.
    pub fn restart_game(&mut self) {
        info!(mode = self.last_mode.as_str(), "restarting game");
        self.start_game(self.last_mode);
    }

    /// Dispatch a player command. Returns true if the session changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start(mode) => {
                self.start_game(mode);
                true
            }
            GameAction::Restart => {
                self.restart_game();
                true
            }
        }
    }

    /// Translate the active piece by `dx` columns if the target is free.
    pub fn move_piece(&mut self, dx: i8) -> bool {
        let Some(piece) = self.controllable_piece() else {
            return false;
        };
        let moved = piece.translated(dx, 0);
        if check_collision(&moved, &self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Rotate clockwise, trying the shape's kicks.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.controllable_piece() else {
            return false;
        };
        match try_rotate(&piece, &self.board) {
            Some(rotated) => {
                if rotated.kick != 0 {
                    trace!(kind = piece.kind.as_str(), kick = rotated.kick, "rotation kicked");
                }
                self.active = Some(rotated.piece);
                true
            }
            None => false,
        }
    }

    /// Move down one row, or lock and spawn if the piece is resting.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable_piece() else {
            return false;
        };
        let lowered = piece.translated(0, 1);
        if !check_collision(&lowered, &self.board) {
            self.active = Some(lowered);
            return true;
        }

        self.lock_active(piece);
        self.spawn_next();
        true
    }

    /// Drop to the landing row and lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.controllable_piece() else {
            return false;
        };
        self.lock_active(landing_position(&piece, &self.board));

        if self.mode == Some(GameMode::Duo) && self.time_remaining == 0 {
            self.enter_game_over("time expired");
        } else {
            self.spawn_next();
        }
        true
    }

    /// `Running <-> Paused`. No-op in any other state.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => {
                self.cancel_timers();
                self.state = SessionState::Paused;
                debug!("paused");
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                self.arm_timers();
                debug!("resumed");
                true
            }
            SessionState::NotStarted | SessionState::GameOver => false,
        }
    }

    /// Handle one timer fire. Returns false for stale handles and fires that arrive in a
    /// state where they no longer apply.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        let live = match handle.kind() {
            TimerKind::Fall => self.fall_timer,
            TimerKind::Countdown => self.countdown_timer,
        };
        if live != Some(handle) {
            trace!(kind = ?handle.kind(), id = handle.id(), "ignoring stale timer");
            return false;
        }
        if self.state != SessionState::Running {
            trace!(kind = ?handle.kind(), state = self.state.as_str(), "timer fired outside running");
            return false;
        }

        match handle.kind() {
            TimerKind::Fall => self.active.is_some() && self.soft_drop(),
            TimerKind::Countdown => self.countdown_tick(),
        }
    }

    /// Deliver every timer that is due on the scheduler's clock. Returns the number of
    /// fires that changed the session.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(handle) = self.scheduler.next_due() {
            if self.on_timer(handle) {
                handled += 1;
            }
        }
        handled
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.map(|piece| piece.kind);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.time_remaining_secs = self.time_remaining;
        out.fall_interval_ms = u32::try_from(self.fall_interval.as_millis()).unwrap_or(u32::MAX);
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
        out.mode = self.mode;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn controllable_piece(&self) -> Option<Piece> {
        if self.state != SessionState::Running {
            return None;
        }
        self.active
    }

    fn countdown_tick(&mut self) -> bool {
        if self.mode != Some(GameMode::Duo) {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.enter_game_over("time expired");
        }
        true
    }

    /// Merge `piece`, clear rows, score, and in solo advance lines and level.
    fn lock_active(&mut self, piece: Piece) {
        self.active = None;
        self.board.merge_piece(&piece);
        let cleared = self.board.clear_full_rows().len();

        let mode = self.mode.unwrap_or(self.last_mode);
        let points = line_clear_points(cleared, scoring_level(mode, self.level));
        self.score = self.score.saturating_add(points);

        let mut new_level = None;
        if mode == GameMode::Solo && cleared > 0 {
            self.lines += cleared as u32;
            let level = level_after_lines(self.level, self.lines, self.config.lines_per_level);
            if level != self.level {
                self.level = level;
                self.fall_interval = fall_interval_for_level(&self.config, level);
                self.fall_timer = Some(
                    self.scheduler
                        .schedule_repeating(TimerKind::Fall, self.fall_interval),
                );
                new_level = Some(level);
                debug!(
                    level,
                    fall_interval_ms = self.fall_interval.as_millis() as u64,
                    "level up"
                );
            }
        }

        debug!(
            kind = piece.kind.as_str(),
            lines = cleared,
            points,
            score = self.score,
            "piece locked"
        );
        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points,
            new_level,
        });
    }

    /// Promote the queued piece and queue another. A blocked spawn ends the game and
    /// leaves the colliding piece visible as the active one.
    fn spawn_next(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.source.next_piece(),
        };
        self.next = Some(self.source.next_piece());
        self.active = Some(piece);

        if check_collision(&piece, &self.board) {
            self.enter_game_over("spawn blocked");
            return false;
        }
        true
    }

    fn arm_timers(&mut self) {
        self.fall_timer = Some(
            self.scheduler
                .schedule_repeating(TimerKind::Fall, self.fall_interval),
        );
        if self.mode == Some(GameMode::Duo) {
            self.countdown_timer = Some(self.scheduler.schedule_repeating(
                TimerKind::Countdown,
                Duration::from_millis(u64::from(COUNTDOWN_TICK_MS)),
            ));
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.fall_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.countdown_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn enter_game_over(&mut self, reason: &'static str) {
        self.cancel_timers();
        self.state = SessionState::GameOver;
        info!(
            reason,
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
    }
}

impl<P: PieceSource> GameSession<ManualScheduler, P> {
    /// Move the virtual clock forward by `by`, firing every timer that falls due in
    /// chronological order. Returns the number of fires that changed the session.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut handled = 0;
        while let Some(deadline) = self.scheduler.next_deadline() {
            if deadline > target {
                break;
            }
            self.scheduler.set_now(deadline);
            handled += self.pump();
        }
        self.scheduler.set_now(target);
        handled + self.pump()
    }

    /// Current time on the virtual clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::seeded(1)
    }
}
