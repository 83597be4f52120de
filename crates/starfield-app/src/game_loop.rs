//! Frame driver and loop thread.
//!
//! `FrameDriver` turns host timestamps into frame deltas, advances the
//! engine, and submits the resulting commands to a graphics backend. The
//! loop thread runs a driver at the display cadence and takes commands over
//! an `mpsc` channel, drained at the top of every frame.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use starfield_core::commands::FlightCommand;
use starfield_core::constants::FRAME_INTERVAL_MS;
use starfield_core::events::FlightEvent;
use starfield_core::state::FrameSnapshot;
use starfield_sim::{FlightEngine, SimError};

use crate::backend::{BackendError, GraphicsBackend};
use crate::state::{LoopCommand, LoopHandle};

/// Nominal duration of one display frame.
const FRAME_DURATION: Duration = Duration::from_millis(FRAME_INTERVAL_MS);

/// Driver and loop failures.
#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("graphics backend: {0}")]
    Backend(#[from] BackendError),

    #[error("could not start frame loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("frame loop thread panicked")]
    LoopPanicked,
}

/// Running totals over a driver's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub deaths: u32,
    pub wraps: u64,
    pub draws: u64,
    pub audio_events: u64,
}

/// Drives an engine from host timestamps.
pub struct FrameDriver<B: GraphicsBackend> {
    engine: FlightEngine,
    backend: B,
    last_timestamp: Option<f64>,
    stats: FrameStats,
}

impl<B: GraphicsBackend> FrameDriver<B> {
    /// Upload the engine's geometry to the backend and get ready for frames.
    pub fn new(engine: FlightEngine, mut backend: B) -> Result<Self, DriverError> {
        backend.upload_geometry(&engine.mesh().buffers)?;
        Ok(Self {
            engine,
            backend,
            last_timestamp: None,
            stats: FrameStats::default(),
        })
    }

    /// Queue a command for the next frame.
    pub fn queue_command(&mut self, command: FlightCommand) {
        self.engine.queue_command(command);
    }

    /// Run one frame for a host timestamp in milliseconds.
    ///
    /// The first frame has dt = 0; after that dt is the gap since the
    /// previous timestamp, unclamped.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Result<FrameSnapshot, DriverError> {
        let dt = match self.last_timestamp {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        let snapshot = self.engine.advance(dt)?;
        self.backend.submit(&snapshot.commands)?;
        self.record(&snapshot);
        Ok(snapshot)
    }

    fn record(&mut self, snapshot: &FrameSnapshot) {
        self.stats.frames += 1;
        self.stats.deaths = snapshot.deaths;
        self.stats.draws += snapshot.draw_calls().count() as u64;
        self.stats.audio_events += snapshot.audio_events.len() as u64;

        for event in &snapshot.events {
            match event {
                FlightEvent::ShipDestroyed { planet, .. } => {
                    info!(
                        "You have died (planet at {:.0}, {:.0}); deaths: {}",
                        planet.x, planet.y, snapshot.deaths
                    );
                }
                FlightEvent::Wrapped { to, .. } => {
                    self.stats.wraps += 1;
                    debug!("Wrapped to ({:.0}, {:.0})", to.x, to.y);
                }
            }
        }
        for event in &snapshot.audio_events {
            debug!("Audio: {event:?}");
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn engine(&self) -> &FlightEngine {
        &self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Spawn the frame loop on its own thread.
///
/// The loop stops on `Shutdown`, when every sender is dropped, after
/// `max_frames` frames if given, or on the first error.
pub fn spawn_frame_loop<B>(
    driver: FrameDriver<B>,
    max_frames: Option<u64>,
) -> Result<LoopHandle, DriverError>
where
    B: GraphicsBackend + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("starfield-frame-loop".into())
        .spawn(move || run_frame_loop(driver, command_rx, &shared, max_frames))?;

    Ok(LoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The frame loop. Timestamps come from a monotonic clock started with the loop.
fn run_frame_loop<B: GraphicsBackend>(
    mut driver: FrameDriver<B>,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    max_frames: Option<u64>,
) -> Result<FrameStats, DriverError> {
    let start = Instant::now();
    let mut next_frame_time = start;

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(LoopCommand::Flight(command)) => driver.queue_command(command),
                Ok(LoopCommand::Shutdown) => return Ok(driver.stats()),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(driver.stats()),
            }
        }

        // 2. Advance and submit one frame
        let timestamp_ms = start.elapsed().as_secs_f64() * 1000.0;
        let snapshot = match driver.on_frame(timestamp_ms) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Frame loop stopping: {err}");
                return Err(err);
            }
        };

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if max_frames.is_some_and(|max| driver.stats().frames >= max) {
            return Ok(driver.stats());
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; the next dt absorbs the stall.
            next_frame_time = now;
        }
    }
}
