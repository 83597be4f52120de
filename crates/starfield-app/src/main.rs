//! starfield: run the flight engine headless.
//!
//! Usage:
//!   starfield --frames 600 --script demo.json --dump last_frame.json
//!   starfield --config flight.json --mode looping --realtime

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use log::{error, info, warn};

use starfield_app::backend::RecordingBackend;
use starfield_app::game_loop::{spawn_frame_loop, DriverError, FrameDriver, FrameStats};
use starfield_app::script::{Script, ScriptError};
use starfield_core::config::{ConfigError, FlightConfig};
use starfield_core::constants::FRAME_INTERVAL_MS;
use starfield_core::enums::FlightMode;
use starfield_core::state::FrameSnapshot;
use starfield_sim::{FlightEngine, SimError};

const DEFAULT_FRAMES: u64 = 600;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("could not write dump: {0}")]
    Dump(#[from] std::io::Error),

    #[error("could not encode dump: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    frames: Option<u64>,
    mode: Option<FlightMode>,
    script: Option<PathBuf>,
    dump: Option<PathBuf>,
    realtime: bool,
    marker: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        error!("{err}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "starfield: headless STARFIELD flight engine\n\
         \n\
         Options:\n\
         \n\
           --config <path>   JSON config file (every field optional)\n\
           --seed <N>        Override the RNG seed\n\
           --mode <mode>     open_world or looping\n\
           --frames <N>      Frames to run (default: {DEFAULT_FRAMES})\n\
           --script <path>   JSON input script: [{{\"frame\": N, \"command\": {{..}}}}]\n\
           --dump <path>     Write the final snapshot and run stats as JSON\n\
           --marker          Draw the spawn marker\n\
           --realtime        Run on the frame loop thread at display cadence\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, AppError> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--seed" => options.seed = Some(parse_number(value(&mut iter, arg)?, arg)?),
            "--frames" => options.frames = Some(parse_number(value(&mut iter, arg)?, arg)?),
            "--mode" => {
                let mode = value(&mut iter, arg)?
                    .parse::<FlightMode>()
                    .map_err(AppError::Usage)?;
                options.mode = Some(mode);
            }
            "--script" => options.script = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--dump" => options.dump = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--realtime" => options.realtime = true,
            "--marker" => options.marker = true,
            other => return Err(AppError::Usage(format!("Unknown option: {other}"))),
        }
    }

    Ok(options)
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, AppError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{flag} needs a value")))
}

fn parse_number(raw: &str, flag: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::Usage(format!("{flag}: not a number: {raw}")))
}

fn run(options: Options) -> Result<(), AppError> {
    let mut config = match &options.config {
        Some(path) => FlightConfig::load(path)?,
        None => FlightConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(mode) = options.mode {
        config.mode = mode;
    }
    config.show_spawn_marker |= options.marker;

    let mut script = match &options.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    let frames = options.frames.unwrap_or(DEFAULT_FRAMES);

    let engine = FlightEngine::new(config)?;
    let driver = FrameDriver::new(engine, RecordingBackend::new())?;
    info!(
        "Running {frames} frames ({} scripted commands{})",
        script.len(),
        if options.realtime { ", realtime" } else { "" }
    );

    let (stats, last) = if options.realtime {
        run_realtime(driver, &mut script, frames)?
    } else {
        run_fixed_step(driver, &mut script, frames)?
    };

    info!(
        "Done: {} frames, {} draws, {} deaths, {} wraps, {} audio events",
        stats.frames, stats.draws, stats.deaths, stats.wraps, stats.audio_events
    );

    if let Some(path) = &options.dump {
        let dump = serde_json::json!({ "stats": stats, "snapshot": last });
        std::fs::write(path, serde_json::to_string_pretty(&dump)?)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Synthetic timestamps at the nominal frame interval. Reproducible.
fn run_fixed_step(
    mut driver: FrameDriver<RecordingBackend>,
    script: &mut Script,
    frames: u64,
) -> Result<(FrameStats, Option<FrameSnapshot>), AppError> {
    let mut last = None;
    for frame in 0..frames {
        for command in script.due(frame) {
            driver.queue_command(command);
        }
        let timestamp = (frame * FRAME_INTERVAL_MS) as f64;
        last = Some(driver.on_frame(timestamp)?);
    }
    Ok((driver.stats(), last))
}

/// Wall-clock frames on the loop thread; script commands are sent as the
/// loop reaches their frame.
fn run_realtime(
    driver: FrameDriver<RecordingBackend>,
    script: &mut Script,
    frames: u64,
) -> Result<(FrameStats, Option<FrameSnapshot>), AppError> {
    let handle = spawn_frame_loop(driver, Some(frames))?;

    while !handle.is_finished() {
        for command in script.due(handle.frames_run()) {
            if !handle.send(command) {
                warn!("Frame loop exited before the script finished");
            }
        }
        std::thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS / 2));
    }

    let last = handle.latest();
    let stats = handle.join()?;
    Ok((stats, last))
}
