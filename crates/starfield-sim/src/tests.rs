//! Tests for the flight engine: generation, flight model, render protocol,
//! looping mode and the audio bus wiring.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use glam::{DMat4, DVec3};

use starfield_core::commands::{FlightCommand, Parameter};
use starfield_core::config::FlightConfig;
use starfield_core::enums::*;
use starfield_core::events::{AudioEvent, FlightEvent};
use starfield_core::math::{make_perspective, make_translation, Mat4};
use starfield_core::state::{RenderCommand, VertexRange};
use starfield_core::types::{Bounds, Pose, Position};

use crate::engine::FlightEngine;
use crate::error::{RenderError, SetupError, SimError};
use crate::world_setup::planets_in_order;

fn empty_engine() -> FlightEngine {
    FlightEngine::without_scenery(FlightConfig::default())
}

fn set(engine: &mut FlightEngine, parameter: Parameter) {
    engine.queue_command(FlightCommand::SetParameter { parameter });
}

fn looping_config() -> FlightConfig {
    FlightConfig {
        mode: FlightMode::Looping,
        ..Default::default()
    }
}

// ---- Generation ----

#[test]
fn test_generation_counts() {
    let engine = FlightEngine::new(FlightConfig::default()).unwrap();
    let world = engine.world();
    assert_eq!(world.len(), 100 + 400 + 1);

    let planets = planets_in_order(world);
    assert_eq!(planets.len(), 101);

    let scatter = engine.config().scatter_bounds();
    for p in &planets[..100] {
        assert!(
            !(p.x.abs() < 800.0 && p.y.abs() < 800.0),
            "planet ({}, {}) inside the clearance square",
            p.x,
            p.y
        );
        assert!(scatter.contains(p.x, p.y));
    }

    // The last planet sits directly behind the spawn point.
    assert_eq!(planets[100], Position::new(0.0, -400.0, 0.0));
}

#[test]
fn test_generation_small_config() {
    let mut config = FlightConfig::default();
    config.generation.planet_count = 3;
    config.generation.star_count = 2;
    let engine = FlightEngine::new(config).unwrap();
    assert_eq!(engine.world().len(), 6);
}

#[test]
fn test_placement_exhausted() {
    let mut config = FlightConfig::default();
    config.viewport.width = 10;
    config.viewport.height = 10;
    config.generation.spread_multiplier = 1.0;
    config.generation.planet_count = 3;

    // Every candidate lands inside the clearance square.
    let err = FlightEngine::new(config).err();
    assert_eq!(
        err,
        Some(SimError::Setup(SetupError::PlacementExhausted {
            requested: 3,
            placed: 0,
            rejected: 31,
        }))
    );
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = FlightConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = FlightEngine::new(config.clone()).unwrap();
    let mut engine_b = FlightEngine::new(config).unwrap();

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(FlightCommand::KeyDown { key_code: 38 });
        engine.queue_command(FlightCommand::KeyDown { key_code: 37 });
    }

    for _ in 0..120 {
        let snap_a = engine_a.advance(16.0).unwrap();
        let snap_b = engine_b.advance(16.0).unwrap();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_different_seeds_scatter_differently() {
    let engine_a = FlightEngine::new(FlightConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let engine_b = FlightEngine::new(FlightConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    let planets_a = planets_in_order(engine_a.world());
    let planets_b = planets_in_order(engine_b.world());
    assert_ne!(planets_a[0], planets_b[0]);
}

// ---- Flight model ----

#[test]
fn test_idle_frame_is_a_no_op() {
    let mut engine = FlightEngine::new(FlightConfig::default()).unwrap();
    let snapshot = engine.advance(0.0).unwrap();

    assert_eq!(snapshot.ship, Pose::spawn());
    assert_eq!(snapshot.deaths, 0);
    assert!(snapshot.events.is_empty());
}

#[test]
fn test_thrust_from_rest() {
    let mut engine = empty_engine();
    set(&mut engine, Parameter::R(0.0));
    engine.queue_command(FlightCommand::KeyDown { key_code: 38 });

    let ship = engine.advance(100.0).unwrap().ship;
    assert_abs_diff_eq!(ship.vel_y, 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ship.position.y, -3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ship.vel_x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ship.position.x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_steering() {
    let mut engine = empty_engine();

    engine.queue_command(FlightCommand::KeyDown { key_code: 39 });
    let ship = engine.advance(100.0).unwrap().ship;
    assert_abs_diff_eq!(ship.heading, PI - 0.5, epsilon = 1e-12);

    // Both held cancel out.
    engine.queue_command(FlightCommand::KeyDown { key_code: 37 });
    let ship = engine.advance(100.0).unwrap().ship;
    assert_abs_diff_eq!(ship.heading, PI - 0.5, epsilon = 1e-12);

    engine.queue_command(FlightCommand::KeyUp { key_code: 39 });
    let ship = engine.advance(100.0).unwrap().ship;
    assert_abs_diff_eq!(ship.heading, PI, epsilon = 1e-12);
}

#[test]
fn test_last_write_wins_before_frame() {
    let mut engine = empty_engine();
    engine.queue_command(FlightCommand::KeyDown { key_code: 38 });
    engine.queue_command(FlightCommand::KeyUp { key_code: 38 });

    let snapshot = engine.advance(16.0).unwrap();
    assert!(!snapshot.input.thrust);
    assert_eq!(snapshot.ship, Pose::spawn());
}

#[test]
fn test_unmapped_key_leaves_latch() {
    let mut engine = empty_engine();
    engine.queue_command(FlightCommand::KeyDown { key_code: 40 });
    let snapshot = engine.advance(16.0).unwrap();
    assert_eq!(snapshot.input, Default::default());
}

#[test]
fn test_touch_both_halves_thrusts() {
    let mut engine = empty_engine();
    engine.queue_command(FlightCommand::Touch {
        touch_xs: vec![10.0, 1270.0],
    });
    let snapshot = engine.advance(16.0).unwrap();
    assert!(snapshot.input.left && snapshot.input.right && snapshot.input.thrust);
}

#[test]
fn test_gravity_pulls_toward_planet() {
    let mut engine = empty_engine();
    engine.spawn_planet(0.0, -400.0);

    // Velocity changes first; position follows on the next frame.
    let ship = engine.advance(16.0).unwrap().ship;
    assert_abs_diff_eq!(ship.vel_y, 0.02, epsilon = 1e-12);
    assert_eq!(ship.position.y, 0.0);

    let ship = engine.advance(16.0).unwrap().ship;
    assert_abs_diff_eq!(ship.position.y, -0.02, epsilon = 1e-12);
    assert!(ship.vel_y > 0.02);
    assert_abs_diff_eq!(ship.vel_x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_gravity_out_of_reach() {
    let mut engine = empty_engine();
    engine.spawn_planet(1500.0, 0.0);
    for _ in 0..10 {
        engine.advance(16.0).unwrap();
    }
    assert_eq!(engine.pose(), Pose::spawn());
}

#[test]
fn test_death_resets_ship() {
    let mut engine = empty_engine();
    engine.spawn_planet(1000.0, 1000.0);
    set(&mut engine, Parameter::X(1020.0));
    set(&mut engine, Parameter::Y(990.0));
    set(&mut engine, Parameter::VelX(3.0));
    set(&mut engine, Parameter::R(1.0));

    let snapshot = engine.advance(16.0).unwrap();
    assert_eq!(snapshot.ship, Pose::spawn());
    assert_eq!(snapshot.deaths, 1);
    assert_eq!(
        snapshot.events,
        vec![FlightEvent::ShipDestroyed {
            at: Position::new(1017.0, 990.0, 0.0),
            planet: Position::new(1000.0, 1000.0, 0.0),
        }]
    );

    // Scenery is untouched.
    assert_eq!(engine.world().len(), 1);
}

// ---- Looping mode ----

#[test]
fn test_looping_wraps_to_opposite_edge() {
    let mut engine = FlightEngine::without_scenery(FlightConfig {
        wrap_bounds: Some(Bounds::centered(1000.0, 1000.0)),
        ..looping_config()
    });
    set(&mut engine, Parameter::X(499.0));
    set(&mut engine, Parameter::VelX(-2.0));

    let snapshot = engine.advance(16.0).unwrap();
    assert_eq!(snapshot.ship.position.x, -500.0);
    assert_eq!(snapshot.ship.vel_x, -2.0);
    assert_eq!(
        snapshot.events,
        vec![FlightEvent::Wrapped {
            from: Position::new(501.0, 0.0, 0.0),
            to: Position::new(-500.0, 0.0, 0.0),
        }]
    );
}

#[test]
fn test_looping_has_no_gravity_or_death() {
    let mut engine = FlightEngine::without_scenery(looping_config());
    engine.spawn_planet(50.0, 50.0);

    let snapshot = engine.advance(16.0).unwrap();
    assert_eq!(snapshot.ship, Pose::spawn());
    assert_eq!(snapshot.deaths, 0);
    assert!(snapshot.events.is_empty());
}

#[test]
fn test_looping_thrust_draws_no_plume() {
    let mut engine = FlightEngine::without_scenery(looping_config());
    engine.queue_command(FlightCommand::KeyDown { key_code: 38 });
    let snapshot = engine.advance(16.0).unwrap();
    assert_eq!(snapshot.count_of(EntityKind::Ship), 1);
    assert_eq!(snapshot.count_of(EntityKind::ThrustPlume), 0);
}

#[test]
fn test_unmapped_kind_is_an_error() {
    let mut engine = FlightEngine::without_scenery(FlightConfig {
        show_spawn_marker: true,
        ..looping_config()
    });
    let err = engine.advance(16.0).unwrap_err();
    assert_eq!(
        err,
        SimError::Render(RenderError::UnmappedKind(EntityKind::Marker))
    );
}

// ---- Render protocol ----

#[test]
fn test_render_order_and_counts() {
    let mut engine = FlightEngine::new(FlightConfig::default()).unwrap();
    engine.queue_command(FlightCommand::KeyDown { key_code: 38 });
    let snapshot = engine.advance(16.0).unwrap();

    assert_eq!(snapshot.commands[0], RenderCommand::Clear);
    match &snapshot.commands[1] {
        RenderCommand::SetLightDirection { direction } => {
            let third = 1.0 / 3.0_f64.sqrt();
            for c in direction {
                assert_abs_diff_eq!(*c, third, epsilon = 1e-12);
            }
        }
        other => panic!("expected SetLightDirection, got {other:?}"),
    }

    let draws: Vec<_> = snapshot.draw_calls().collect();
    assert_eq!(draws.len(), 1 + 1 + 501);
    assert_eq!(draws[0].kind, EntityKind::Ship);
    assert_eq!(draws[0].range, VertexRange { first: 0, count: 24 });
    assert_eq!(draws[0].color, [0.7, 0.2, 0.2, 1.0]);
    assert_eq!(draws[1].kind, EntityKind::ThrustPlume);
    assert_eq!(draws[1].color, [1.0, 0.5, 0.0, 0.8]);

    assert_eq!(snapshot.count_of(EntityKind::Planet), 101);
    assert_eq!(snapshot.count_of(EntityKind::Star), 400);

    for star in draws.iter().filter(|d| d.kind == EntityKind::Star) {
        assert_eq!(star.color[1], 0.0);
        assert_eq!(star.color[3], 1.0);
        assert_abs_diff_eq!(star.color[0] + star.color[2], 1.0, epsilon = 1e-6);
        assert_eq!(star.range, VertexRange { first: 60, count: 6 });
    }
}

#[test]
fn test_scenery_drawn_in_spawn_order() {
    let mut engine = empty_engine();
    engine.spawn_star(1.0, 1.0);
    engine.spawn_planet(5000.0, 5000.0);
    engine.spawn_star(2.0, 2.0);

    let snapshot = engine.advance(16.0).unwrap();
    let kinds: Vec<EntityKind> = snapshot.draw_calls().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EntityKind::Ship,
            EntityKind::Star,
            EntityKind::Planet,
            EntityKind::Star
        ]
    );
}

#[test]
fn test_spawn_marker_overlay() {
    let mut engine = FlightEngine::without_scenery(FlightConfig {
        show_spawn_marker: true,
        ..Default::default()
    });
    set(&mut engine, Parameter::X(300.0));

    let snapshot = engine.advance(16.0).unwrap();
    let draws: Vec<_> = snapshot.draw_calls().collect();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[1].kind, EntityKind::Marker);
    assert_eq!(draws[1].world, Mat4::IDENTITY);
    assert_eq!(draws[1].range, VertexRange { first: 69, count: 3 });
}

#[test]
fn test_ship_composite_matches_glam() {
    let mut engine = empty_engine();
    set(&mut engine, Parameter::X(120.0));
    set(&mut engine, Parameter::Y(-40.0));
    set(&mut engine, Parameter::R(0.3));

    let snapshot = engine.advance(0.0).unwrap();
    let ship = snapshot.draw_calls().next().unwrap();

    assert_eq!(ship.world, make_translation(120.0, -40.0, 0.0));

    let settings = engine.settings();
    let world = DMat4::from_translation(DVec3::new(120.0, -40.0, 0.0));
    let view = DMat4::from_translation(DVec3::new(120.0, -40.0, settings.camera_distance)).inverse();
    let rotation = DMat4::from_rotation_z(0.3);
    let projection = make_perspective(
        settings.fov,
        1280.0 / 720.0,
        settings.z_near,
        settings.z_far,
    )
    .to_glam();

    let expected = Mat4::from_glam(&(projection * rotation * view * world));
    for i in 0..16 {
        assert_abs_diff_eq!(
            ship.world_view_projection.0[i],
            expected.0[i],
            epsilon = 1e-9
        );
    }
}

// ---- Parameters ----

#[test]
fn test_set_parameters() {
    let mut engine = empty_engine();
    set(&mut engine, Parameter::CameraDistance(800.0));
    set(&mut engine, Parameter::Fov(1.2));
    set(&mut engine, Parameter::LightX(0.0));
    set(&mut engine, Parameter::Z(12.0));
    set(&mut engine, Parameter::AnimateSpeed(0.5));
    set(
        &mut engine,
        Parameter::OscillatorType1(OscillatorType::Square),
    );
    set(&mut engine, Parameter::OscillatorDetune2(40.0));
    engine.advance(0.0).unwrap();

    let settings = engine.settings();
    assert_eq!(settings.camera_distance, 800.0);
    assert_eq!(settings.fov, 1.2);
    assert_eq!(settings.light_x, 0.0);
    assert_eq!(settings.animate_speed, 0.5);
    assert_eq!(settings.oscillator_type_1, OscillatorType::Square);
    assert_eq!(settings.oscillator_detune_2, 40.0);
    assert_eq!(engine.pose().position.z, 12.0);
}

#[test]
fn test_fps_tracks_last_delta() {
    let mut engine = empty_engine();
    assert_eq!(engine.advance(20.0).unwrap().fps, 50.0);
    assert_eq!(engine.advance(0.0).unwrap().fps, 0.0);
    assert_eq!(engine.time().frame, 2);
}

// ---- Audio wiring ----

#[test]
fn test_rumble_follows_thrust() {
    let mut engine = empty_engine();

    engine.queue_command(FlightCommand::KeyDown { key_code: 38 });
    let events = engine.advance(16.0).unwrap().audio_events;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], AudioEvent::RumbleStart { .. }));
    assert!(engine.is_rumbling());

    assert!(engine.advance(16.0).unwrap().audio_events.is_empty());

    engine.queue_command(FlightCommand::KeyUp { key_code: 38 });
    assert_eq!(
        engine.advance(16.0).unwrap().audio_events,
        vec![AudioEvent::RumbleStop]
    );
    assert!(engine.advance(16.0).unwrap().audio_events.is_empty());
}

#[test]
fn test_keyboard_notes() {
    let mut engine = empty_engine();
    set(
        &mut engine,
        Parameter::OscillatorType2(OscillatorType::Sine),
    );
    engine.queue_command(FlightCommand::NoteOn { frequency: 440.0 });
    let events = engine.advance(16.0).unwrap().audio_events;
    match &events[..] {
        [AudioEvent::NoteStart { frequency, voices }] => {
            assert_eq!(*frequency, 440.0);
            assert_eq!(voices[1].waveform, OscillatorType::Sine);
        }
        other => panic!("expected one NoteStart, got {other:?}"),
    }

    engine.queue_command(FlightCommand::NoteOff { frequency: 440.0 });
    engine.queue_command(FlightCommand::NoteOff { frequency: 440.0 });
    assert_eq!(
        engine.advance(16.0).unwrap().audio_events,
        vec![AudioEvent::NoteStop { frequency: 440.0 }]
    );
}
