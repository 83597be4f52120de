//! State shared between the host thread and the frame loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use starfield_core::commands::FlightCommand;
use starfield_core::state::FrameSnapshot;

use crate::game_loop::{DriverError, FrameStats};

/// Commands sent from the host to the frame loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Input or a parameter change to forward to the engine.
    Flight(FlightCommand),
    /// Stop the loop after the current frame.
    Shutdown,
}

/// Handle to a running frame loop.
///
/// `mpsc::Sender` is not `Sync`, so a host that shares the handle across
/// threads wraps it in a `Mutex`.
pub struct LoopHandle {
    pub(crate) command_tx: mpsc::Sender<LoopCommand>,
    /// Latest snapshot, updated by the loop after every frame.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub(crate) thread: JoinHandle<Result<FrameStats, DriverError>>,
}

impl LoopHandle {
    /// Forward a command. Returns false if the loop has already exited.
    pub fn send(&self, command: FlightCommand) -> bool {
        self.command_tx.send(LoopCommand::Flight(command)).is_ok()
    }

    /// Copy of the most recent snapshot, if a frame has run.
    pub fn latest(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Frames completed so far, without copying the snapshot.
    pub fn frames_run(&self) -> u64 {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.as_ref().map(|s| s.time.frame))
            .unwrap_or(0)
    }

    /// Whether the loop thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Result<FrameStats, DriverError> {
        // The loop may have exited on its own; a closed channel is fine.
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to finish on its own (frame limit or error).
    pub fn join(self) -> Result<FrameStats, DriverError> {
        self.thread.join().map_err(|_| DriverError::LoopPanicked)?
    }
}
