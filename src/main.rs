//! Tilt Invaders entry point
//!
//! Runs a headless autopilot session: no window, controls fall back to the
//! keyboard rules, and events are logged instead of drawn or played.
//!
//! Usage: `tilt-invaders [--config PATH] [--seconds N] [--realtime] [--seed N] [--smoothing MODE] [--mute]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser as _;
use tilt_invaders::audio::{self, LogSound};
use tilt_invaders::input::{Controls, NoHardware};
use tilt_invaders::sim::{GameEvent, GamePhase, GameState, SimClock, TickInput, tick};
use tilt_invaders::{GameConfig, Smoothing};

/// Maximum ticks run for one frame
const MAX_SUBSTEPS: u32 = 8;

#[derive(clap::Parser, Debug)]
#[clap(name = "tilt-invaders", about = "Headless Tilt Invaders autopilot run")]
struct Arguments {
    /// JSON config file; defaults are used when absent
    #[clap(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[clap(short, long, value_parser, default_value = "30")]
    seconds: f32,

    /// Pace ticks against the wall clock with a variable step
    #[clap(short, long)]
    realtime: bool,

    /// Override the configured RNG seed
    #[clap(long)]
    seed: Option<u64>,

    /// Tilt smoothing mode (off, exponential)
    #[clap(long, value_parser = parse_smoothing)]
    smoothing: Option<Smoothing>,

    /// Skip sound effect dispatch
    #[clap(short, long)]
    mute: bool,
}

fn parse_smoothing(s: &str) -> Result<Smoothing, String> {
    Smoothing::from_str(s).ok_or_else(|| format!("unknown smoothing mode: {s}"))
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Arguments::parse();

    let mut config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(smoothing) = args.smoothing {
        config.input.smoothing = smoothing;
    }

    run(&config, &args);
    ExitCode::SUCCESS
}

fn run(config: &GameConfig, args: &Arguments) {
    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Tilt Invaders (headless) starting, seed {seed}");

    let mut state = GameState::new(config, seed);
    let mut controls = Controls::detect(&config.input, &mut NoHardware);
    log::info!(
        "Controls: movement={}, fire={}, tilt smoothing={}",
        controls.movement_source(),
        controls.fire_source(),
        config.input.smoothing.as_str()
    );
    let mut sound = LogSound::new();
    sound.set_muted(args.mute);

    let frame = 1.0 / config.target_fps as f32;
    let mut clock = if args.realtime {
        SimClock::variable(config.max_frame_dt)
    } else {
        SimClock::fixed(frame, MAX_SUBSTEPS, config.max_frame_dt)
    };
    log::debug!("Clock: {:?}", clock.mode());

    let mut games = 0u32;
    let mut simulated = 0.0f32;
    let mut last = Instant::now();
    while simulated < args.seconds {
        let frame_dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(frame));
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            dt
        } else {
            frame
        };

        for dt in clock.push_frame(frame_dt) {
            let input = TickInput::autopilot(&state);
            tick(&mut state, &mut controls, &input, config, dt);
            simulated += dt;

            let events = state.drain_events();
            audio::dispatch(&events, &mut sound);
            for event in &events {
                match event {
                    GameEvent::GameOver { score } => {
                        games += 1;
                        log::info!("Game {games} over: score {score}, wave {}", state.wave);
                    }
                    GameEvent::InputDowngraded { axis } => {
                        log::warn!("{axis:?} input switched to keyboard");
                    }
                    _ => {}
                }
            }
        }
    }

    controls.shutdown();
    let status = match state.phase {
        GamePhase::Playing => "in progress",
        GamePhase::GameOver => "over",
        GamePhase::Menu => "at menu",
    };
    log::info!(
        "Ran {simulated:.1}s over {} ticks: {games} games finished, current game {status} with score {}, best {}",
        state.time_ticks,
        state.score,
        state.high_score
    );
}
