//! Session state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Result};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::SimConfig;

use crate::game_loop;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle on a running (or not yet started) game loop.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state can be shared across threads
/// - `Mutex<Option<...>>` for things that only exist after `start`
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Start the game loop thread. Fails if it is already running.
    pub fn start(&self, config: SimConfig) -> Result<()> {
        let mut tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        if tx_lock.is_some() {
            bail!("simulation already running");
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        if let Ok(mut lock) = self.loop_handle.lock() {
            *lock = Some(handle);
        }
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        let tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => bail!("simulation not started"),
        }
    }

    /// Latest snapshot, for polling.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Stop the game loop and wait for the thread to exit.
    pub fn shutdown(&self) -> Result<()> {
        if let Ok(mut tx_lock) = self.command_tx.lock() {
            if let Some(tx) = tx_lock.take() {
                // A disconnected channel means the loop already exited.
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        let handle = self
            .loop_handle
            .lock()
            .map_err(|e| anyhow!("loop handle lock poisoned: {e}"))?
            .take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use bastion_core::enums::GamePhase;

    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.snapshot().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send(PlayerCommand::StartGame).unwrap_err();
        assert!(err.to_string().contains("not started"));
    }

    #[test]
    fn test_start_send_shutdown() {
        let state = AppState::new();
        state.start(SimConfig::default()).unwrap();
        assert!(state.is_running());
        assert!(state.start(SimConfig::default()).is_err());

        state.send(PlayerCommand::StartGame).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut active = false;
        while Instant::now() < deadline {
            if state
                .snapshot()
                .is_some_and(|s| s.phase == GamePhase::Active)
            {
                active = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(active, "game loop never reported an active game");

        state.shutdown().unwrap();
        assert!(!state.is_running());
    }
}
