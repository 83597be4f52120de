//! Flight engine, the core of the toy.
//!
//! `FlightEngine` owns the scenery world, the ship, the input latch and the
//! live settings. Each `advance(dt)` applies queued commands, runs the
//! systems, and renders a `FrameSnapshot`. Completely headless, so a fixed
//! seed and a fixed dt sequence always produce the same frames.

use std::collections::VecDeque;

use hecs::World;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfield_core::commands::{FlightCommand, Parameter};
use starfield_core::config::{FlightConfig, FlightSettings};
use starfield_core::enums::FlightMode;
use starfield_core::events::FlightEvent;
use starfield_core::state::FrameSnapshot;
use starfield_core::types::{FrameTime, InputLatch, Pose, Position};

use crate::audio::AudioBus;
use crate::error::SimError;
use crate::geometry::Mesh;
use crate::input;
use crate::systems;
use crate::world_setup;

/// The flight engine. Owns all scene state.
pub struct FlightEngine {
    world: World,
    config: FlightConfig,
    settings: FlightSettings,
    pose: Pose,
    input: InputLatch,
    time: FrameTime,
    rng: ChaCha8Rng,
    mesh: Mesh,
    audio: AudioBus,
    deaths: u32,
    command_queue: VecDeque<FlightCommand>,
}

impl FlightEngine {
    /// Create an engine and generate its scenery.
    pub fn new(config: FlightConfig) -> Result<Self, SimError> {
        let mut engine = Self::without_scenery(config);
        let spawned = world_setup::populate_scenery(
            &mut engine.world,
            &mut engine.rng,
            &engine.config,
            engine.pose.position,
        )?;
        info!(
            "Flight engine ready: seed {}, {:?} mode, {} scenery entities",
            engine.config.seed, engine.config.mode, spawned
        );
        Ok(engine)
    }

    /// Create an engine with an empty sky. Hosts and tests can add their own
    /// scenery through [`FlightEngine::spawn_planet`] and
    /// [`FlightEngine::spawn_star`].
    pub fn without_scenery(config: FlightConfig) -> Self {
        Self {
            world: World::new(),
            settings: config.settings.clone(),
            pose: Pose::spawn(),
            input: InputLatch::default(),
            time: FrameTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            mesh: Mesh::for_mode(config.mode),
            audio: AudioBus::new(),
            deaths: 0,
            command_queue: VecDeque::new(),
            config,
        }
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: FlightCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FlightCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt_ms` milliseconds and render the frame.
    ///
    /// No clamping: a large dt after a stall moves the ship a long way.
    pub fn advance(&mut self, dt_ms: f64) -> Result<FrameSnapshot, SimError> {
        self.process_commands();
        self.time.advance(dt_ms);

        let events = self.run_systems(dt_ms);

        self.audio.update_rumble(self.input.thrust, self.time.elapsed_ms);

        let frame = systems::render::FrameView {
            ship: &self.pose,
            settings: &self.settings,
            aspect: self.config.viewport.aspect(),
            draw_plume: self.input.thrust && self.config.mode == FlightMode::OpenWorld,
            marker: self.config.show_spawn_marker.then(|| Pose::spawn().position),
        };
        let commands = systems::render::run(&self.world, &frame, &self.mesh.table, &mut self.rng)?;

        debug!(
            "Frame {}: dt {:.1} ms, ship ({:.1}, {:.1}) heading {:.3}, {} commands",
            self.time.frame,
            dt_ms,
            self.pose.position.x,
            self.pose.position.y,
            self.pose.heading,
            commands.len()
        );

        Ok(FrameSnapshot {
            time: self.time,
            mode: self.config.mode,
            ship: self.pose,
            input: self.input,
            fps: self.time.fps(),
            deaths: self.deaths,
            commands,
            audio_events: self.audio.drain(),
            events,
        })
    }

    /// Get the current ship pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Get the current live settings.
    pub fn settings(&self) -> &FlightSettings {
        &self.settings
    }

    /// Get the input latch as the next frame will see it (before queued commands).
    pub fn input(&self) -> InputLatch {
        self.input
    }

    /// Get the frame timing.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Deaths since the engine started.
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Get a read-only reference to the scenery world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Vertex buffers and the kind → range table for this engine's mode.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Whether the engine rumble is sounding.
    pub fn is_rumbling(&self) -> bool {
        self.audio.is_rumbling()
    }

    /// Add a planet after generation, placed last in draw and gravity order.
    pub fn spawn_planet(&mut self, x: f64, y: f64) -> hecs::Entity {
        let order = self.next_spawn_order();
        world_setup::spawn_planet(&mut self.world, order, Position::new(x, y, 0.0))
    }

    /// Add a star after generation, placed last in draw order.
    pub fn spawn_star(&mut self, x: f64, y: f64) -> hecs::Entity {
        let order = self.next_spawn_order();
        world_setup::spawn_star(&mut self.world, order, Position::new(x, y, 0.0))
    }

    fn next_spawn_order(&self) -> u32 {
        self.world.len()
    }

    /// Process all queued commands. Later commands overwrite earlier ones.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: FlightCommand) {
        match command {
            FlightCommand::KeyDown { key_code } => {
                input::apply_key(&mut self.input, key_code, true);
            }
            FlightCommand::KeyUp { key_code } => {
                input::apply_key(&mut self.input, key_code, false);
            }
            FlightCommand::Touch { touch_xs } => {
                input::apply_touches(
                    &mut self.input,
                    &touch_xs,
                    self.config.viewport.width as f64,
                );
            }
            FlightCommand::SetParameter { parameter } => self.set_parameter(parameter),
            FlightCommand::NoteOn { frequency } => self.audio.note_on(frequency, &self.settings),
            FlightCommand::NoteOff { frequency } => self.audio.note_off(frequency),
        }
    }

    /// Write one externally settable field. Values are taken as given.
    fn set_parameter(&mut self, parameter: Parameter) {
        debug!("Set {} = {:?}", parameter.name(), parameter);
        let s = &mut self.settings;
        match parameter {
            Parameter::AnimateSpeed(v) => s.animate_speed = v,
            Parameter::X(v) => self.pose.position.x = v,
            Parameter::Y(v) => self.pose.position.y = v,
            Parameter::Z(v) => self.pose.position.z = v,
            Parameter::R(v) => self.pose.heading = v,
            Parameter::VelX(v) => self.pose.vel_x = v,
            Parameter::VelY(v) => self.pose.vel_y = v,
            Parameter::LightX(v) => s.light_x = v,
            Parameter::LightY(v) => s.light_y = v,
            Parameter::LightZ(v) => s.light_z = v,
            Parameter::CameraDistance(v) => s.camera_distance = v,
            Parameter::Fov(v) => s.fov = v,
            Parameter::ZNear(v) => s.z_near = v,
            Parameter::ZFar(v) => s.z_far = v,
            Parameter::OscillatorType1(t) => s.oscillator_type_1 = t,
            Parameter::OscillatorType2(t) => s.oscillator_type_2 = t,
            Parameter::OscillatorDetune1(v) => s.oscillator_detune_1 = v,
            Parameter::OscillatorDetune2(v) => s.oscillator_detune_2 = v,
        }
    }

    /// Run the flight systems in order and collect gameplay events.
    fn run_systems(&mut self, dt_ms: f64) -> Vec<FlightEvent> {
        let physics = &self.config.physics;
        systems::steering::run(&mut self.pose, &self.input, physics, dt_ms);
        systems::movement::run(&mut self.pose, &self.input, physics, dt_ms);

        match self.config.mode {
            FlightMode::OpenWorld => {
                let events = systems::gravity::run(
                    &self.world,
                    &mut self.pose,
                    Pose::spawn(),
                    physics,
                    dt_ms,
                );
                self.deaths += events.len() as u32;
                events
            }
            FlightMode::Looping => {
                let bounds = self.config.effective_wrap_bounds();
                systems::boundary::run(&mut self.pose, &bounds)
                    .into_iter()
                    .collect()
            }
        }
    }
}
