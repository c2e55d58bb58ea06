//! Session driver - runs a session on a tokio task.
//!
//! The task is the only owner of the session. Player commands arrive on a bounded `mpsc`
//! channel, timers are served by sleeping until the scheduler's next deadline, and after
//! every step the fresh snapshot is published on a `watch` channel.

use anyhow::{anyhow, Context, Result};
use blockfall_core::rng::{PieceSource, Randomizer};
use blockfall_core::{EngineConfig, GameSession, GameSnapshot, Scheduler};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::scheduler::TokioScheduler;
use crate::types::GameAction;

/// Session type the driver runs.
pub type TokioSession<P = Randomizer> = GameSession<TokioScheduler, P>;

/// Command delivered to the driver task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Action(GameAction),
    Shutdown,
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Capacity of the command channel.
    pub command_buffer: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { command_buffer: 32 }
    }
}

impl DriverConfig {
    /// Create from environment variables (`BLOCKFALL_COMMAND_BUFFER`)
    pub fn from_env() -> Self {
        let command_buffer = std::env::var("BLOCKFALL_COMMAND_BUFFER")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(32);
        Self { command_buffer }
    }
}

/// Build a session on the tokio clock with an entropy-seeded randomizer.
pub fn new_session(config: EngineConfig) -> TokioSession {
    GameSession::new(config, TokioScheduler::new(), Randomizer::from_entropy())
}

/// Handle to a running driver task.
pub struct SessionDriver<P: PieceSource = Randomizer> {
    cmd_tx: mpsc::Sender<SessionCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<TokioSession<P>>,
}

impl<P> SessionDriver<P>
where
    P: PieceSource + Send + 'static,
{
    /// Spawn the driver with the default configuration. Must be called inside a tokio
    /// runtime.
    pub fn spawn(session: TokioSession<P>) -> Self {
        Self::spawn_with(session, DriverConfig::default())
    }

    pub fn spawn_with(session: TokioSession<P>, config: DriverConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let task = tokio::spawn(run(session, cmd_rx, snapshot_tx));
        Self {
            cmd_tx,
            snapshot_rx,
            task,
        }
    }

    /// Queue a player command, waiting for channel capacity.
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .send(SessionCommand::Action(action))
            .await
            .map_err(|_| anyhow!("session driver has stopped"))
    }

    /// Queue a player command without waiting. Fails if the channel is full or closed.
    pub fn try_send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .try_send(SessionCommand::Action(action))
            .map_err(|e| anyhow!("failed to queue {}: {}", action.as_str(), e))
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the task and get the session back.
    pub async fn shutdown(self) -> Result<TokioSession<P>> {
        // A closed channel means the task already exited; join it either way.
        let _ = self.cmd_tx.send(SessionCommand::Shutdown).await;
        self.task.await.context("session driver task failed")
    }
}

async fn run<P: PieceSource>(
    mut session: TokioSession<P>,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
) -> TokioSession<P> {
    info!("session driver started");

    loop {
        let deadline = session.scheduler().next_deadline();
        let wake = deadline.unwrap_or_else(Instant::now);

        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(SessionCommand::Action(action)) => {
                    let changed = session.apply_action(action);
                    debug!(action = action.as_str(), changed, "applied action");
                }
                Some(SessionCommand::Shutdown) | None => break,
            },
            _ = sleep_until(wake), if deadline.is_some() => {
                session.pump();
            }
        }

        snapshot_tx.send_replace(session.snapshot());
    }

    info!(state = session.state().as_str(), "session driver stopped");
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameMode, SessionState};

    #[test]
    fn test_default_config() {
        assert_eq!(DriverConfig::default().command_buffer, 32);
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_initial_snapshot() {
        let driver = SessionDriver::spawn(new_session(EngineConfig::default()));
        assert_eq!(driver.snapshot().state, SessionState::NotStarted);
        let session = driver.shutdown().await.unwrap();
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_published() {
        let driver = SessionDriver::spawn(new_session(EngineConfig::default()));
        let mut rx = driver.subscribe();

        driver.send(GameAction::Start(GameMode::Duo)).await.unwrap();
        rx.changed().await.unwrap();

        let snap = *rx.borrow();
        assert_eq!(snap.mode, Some(GameMode::Duo));
        assert_eq!(snap.time_remaining_secs, 30);
        driver.shutdown().await.unwrap();
    }
}
