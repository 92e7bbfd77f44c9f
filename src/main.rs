//! Pi Workshop command-line entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SenseHatAdapter / SimBoard   RpicamCamera / SimCamera       │
//! │  ConsoleSink / LogEventSink   JsonConfigFile                 │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  Activity runner · the nine classroom activities   │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use core::fmt::Display;
use core::time::Duration;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pi_workshop::activities::alarm::IntruderAlarm;
use pi_workshop::activities::boot_ip::BootIp;
use pi_workshop::activities::camera::CandidCamera;
use pi_workshop::activities::dice::DigitalDice;
use pi_workshop::activities::environment::EnvironmentMonitor;
use pi_workshop::activities::hello::Hello;
use pi_workshop::activities::joystick::JoystickBasics;
use pi_workshop::activities::reaction::ReactionGame;
use pi_workshop::activities::spirit_level::SpiritLevel;
use pi_workshop::adapters::camera::RpicamCamera;
use pi_workshop::adapters::config_file::JsonConfigFile;
use pi_workshop::adapters::hardware::SenseHatAdapter;
use pi_workshop::adapters::log_sink::{ConsoleSink, LogEventSink};
use pi_workshop::adapters::sim::{SimBoard, SimCamera};
use pi_workshop::app::ports::{
    Camera, Clock, ConfigPort, EnvironmentSensors, EventSink, Joystick, LedMatrix, MotionSensors,
    NetworkProbe,
};
use pi_workshop::app::runner::{run, Activity};
use pi_workshop::config::{self, WorkshopConfig};
use pi_workshop::drivers::sysfs::SysfsRoot;
use pi_workshop::shutdown::StopSignal;

// ── Command line ──────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Sense HAT classroom activities", long_about = None)]
struct Cli {
    /// JSON config file (default: ~/.config/pi-workshop/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Run against a simulated board with virtual time
    #[arg(long, global = true)]
    simulate: bool,

    /// Virtual seconds before a simulated run is stopped
    #[arg(long, global = true, default_value_t = 60)]
    sim_seconds: u64,

    /// Seed for dice and reaction randomness
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a message across the LED matrix
    Hello {
        /// Text to scroll instead of the configured greeting
        message: Option<String>,
    },
    /// Colour-coded temperature, humidity and pressure monitor
    Environment,
    /// Arrow pointing downhill, green tick when level
    SpiritLevel,
    /// Countdown photo booth, optionally followed by a time-lapse
    Camera {
        /// After the single photo, take N more as a time-lapse
        #[arg(long, value_name = "N")]
        timelapse: Option<u32>,
        /// Seconds between time-lapse photos
        #[arg(long, value_name = "S", requires = "timelapse")]
        interval: Option<u64>,
    },
    /// Heat and motion intruder alarm with photo evidence
    Alarm {
        /// Hide the live sensor readings
        #[arg(long)]
        quiet: bool,
    },
    /// Light the matrix in the colour of each joystick press
    Joystick,
    /// Shake the board to roll a die
    Dice,
    /// Press the matching direction as fast as you can
    Reaction {
        /// Number of rounds to play
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: Option<u32>,
    },
    /// Scroll the board's IP address (for use at boot)
    ShowIp,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Write the default configuration to the config path
    Init,
}

// ── Entry point ───────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Pi Workshop v{}", env!("CARGO_PKG_VERSION"));

    let store = JsonConfigFile::new(cli.config.clone().unwrap_or_else(config::default_path));
    if let Command::Config { action } = &cli.command {
        return config_command(action, &store);
    }
    let mut cfg = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    apply_overrides(&mut cfg, &cli.command);
    cfg.validate().context("invalid command-line option")?;

    let stop = StopSignal::new();
    if let Err(e) = stop.install_ctrlc() {
        warn!("Ctrl-C handler not installed: {e}");
    }

    if cli.simulate {
        let mut board = SimBoard::demo();
        board
            .clock
            .stop_at(Duration::from_secs(cli.sim_seconds), stop.clone());
        info!("simulating {} s of virtual time", cli.sim_seconds);
        dispatch(&cli, &cfg, &mut board, SimCamera::new(), &stop)
    } else {
        let mut hat =
            SenseHatAdapter::open(&SysfsRoot::default()).context("opening the Sense HAT")?;
        let camera = RpicamCamera::new(cfg.camera.capture_command.clone());
        dispatch(&cli, &cfg, &mut hat, camera, &stop)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn config_command(action: &ConfigAction, store: &JsonConfigFile) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            let cfg = store.load()?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        ConfigAction::Init => {
            store.save(&WorkshopConfig::default())?;
            println!("Wrote defaults to {}", store.path().display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Fold command-line options into the loaded config so they go through the
/// same validation as the file.
fn apply_overrides(cfg: &mut WorkshopConfig, command: &Command) {
    match command {
        Command::Hello { message: Some(m) } => cfg.hello.message.clone_from(m),
        Command::Camera {
            timelapse,
            interval,
        } => {
            if let Some(n) = timelapse {
                cfg.camera.timelapse.enabled = *n > 0;
                cfg.camera.timelapse.photos = *n;
            }
            if let Some(s) = interval {
                cfg.camera.timelapse.interval_ms = s.saturating_mul(1000);
            }
        }
        Command::Alarm { quiet: true } => cfg.alarm.debug = false,
        Command::Reaction { rounds: Some(n) } => cfg.reaction.rounds = *n,
        _ => {}
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

// ── Activity dispatch ─────────────────────────────────────────

fn dispatch<H, C>(
    cli: &Cli,
    cfg: &WorkshopConfig,
    hw: &mut H,
    camera: C,
    stop: &StopSignal,
) -> Result<ExitCode>
where
    H: LedMatrix + EnvironmentSensors + MotionSensors + Joystick + NetworkProbe + Clock,
    C: Camera,
{
    let scroll = Duration::from_millis(cfg.display.scroll_ms);
    let mut console = ConsoleSink::new();
    if !matches!(cli.command, Command::ShowIp) {
        hw.set_rotation(cfg.rotation())?;
    }

    match &cli.command {
        Command::Hello { .. } => {
            report(Hello::new(cfg.hello.clone()), hw, &mut console, stop)?;
        }
        Command::Environment => {
            report(EnvironmentMonitor::new(cfg.environment.clone()), hw, &mut console, stop)?;
        }
        Command::SpiritLevel => {
            report(SpiritLevel::new(cfg.spirit_level.clone()), hw, &mut console, stop)?;
        }
        Command::Camera { .. } => {
            let cam = cfg.camera.clone();
            report(CandidCamera::new(cam, scroll, camera), hw, &mut console, stop)?;
        }
        Command::Alarm { .. } => {
            let capture = cfg.camera.capture_settings();
            let alarm = IntruderAlarm::new(cfg.alarm.clone(), capture, scroll, camera);
            report(alarm, hw, &mut console, stop)?;
        }
        Command::Joystick => {
            report(JoystickBasics::new(cfg.joystick.clone()), hw, &mut console, stop)?;
        }
        Command::Dice => {
            report(DigitalDice::new(cfg.dice.clone(), rng(cli.seed)), hw, &mut console, stop)?;
        }
        Command::Reaction { .. } => {
            let game = ReactionGame::new(cfg.reaction.clone(), rng(cli.seed));
            report(game, hw, &mut console, stop)?;
        }
        Command::ShowIp => {
            let mut sink = LogEventSink::new();
            let mut activity = BootIp::new(cfg.boot_ip.clone());
            let outcome = run(&mut activity, hw, &mut sink, stop).context("show-ip")?;
            print!("{}", outcome.summary);
            if !outcome.summary.connected() && !outcome.interrupted {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Config { .. } => {}
    }
    Ok(ExitCode::SUCCESS)
}

/// Run `activity` and print its summary.
fn report<H, A>(
    mut activity: A,
    hw: &mut H,
    sink: &mut dyn EventSink,
    stop: &StopSignal,
) -> Result<()>
where
    H: ?Sized,
    A: Activity<H>,
    A::Summary: Display,
{
    let name = activity.name();
    let outcome = run(&mut activity, hw, sink, stop).with_context(|| format!("{name} failed"))?;
    print!("{}", outcome.summary);
    Ok(())
}
