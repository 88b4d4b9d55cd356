//! Slippery Pole entry point
//!
//! Sets up logging, settings and the terminal, then runs the fixed 60 Hz
//! loop: input snapshot, simulation step, sound cues, draw, sleep.

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};

use slippery_pole::audio::{AudioManager, SoundBackend, TerminalBell};
use slippery_pole::consts::TICK_RATE;
use slippery_pole::input::{self, InputTracker};
use slippery_pole::renderer::{Hud, Renderer, TerminalRenderer};
use slippery_pole::sim::TickInput;
use slippery_pole::{Session, Settings};

#[derive(Parser, Debug)]
#[command(name = "slippery-pole")]
#[command(about = "Climb the pole, keep your balance, dodge the coconuts", long_about = None)]
struct Args {
    /// Run seed (overrides the settings file; random when unset)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (JSON)
    #[arg(long, default_value = "slippery_pole.json")]
    settings: PathBuf,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Simulate without a terminal and print the final frame as JSON
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Tick limit for --headless
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Hold Up for the whole --headless run
    #[arg(long, default_value_t = false)]
    hold_up: bool,
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    // The terminal frontend owns stderr's screen, so stay quiet there
    // unless logs are going somewhere else.
    let default_filter = if args.headless || args.log_file.is_some() {
        "info"
    } else {
        "error"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;
    log::info!("Slippery Pole starting...");

    let settings = Settings::load_or_default(&args.settings);
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);

    if args.headless {
        run_headless(seed, args.ticks, args.hold_up)
    } else {
        run_terminal(seed, &settings)
    }
}

/// Step the core with no renderer and no audio device attached
fn run_headless(seed: u64, ticks: u64, hold_up: bool) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(seed);
    let mut audio = AudioManager::default();
    let input = TickInput {
        up: hold_up,
        ..Default::default()
    };

    for _ in 0..ticks {
        let events = session.step(&input);
        audio.play_all(&events);
        if session.state().phase.is_terminal() {
            break;
        }
    }

    log::info!(
        "Headless run finished after {} ticks ({} cues dropped)",
        session.ticks(),
        audio.dropped()
    );
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn run_terminal(seed: u64, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut renderer = TerminalRenderer::new(io::stdout())?;
    let mut keys = InputTracker::new(renderer.reports_key_releases());

    let backend = settings
        .terminal_bell
        .then(|| Box::new(TerminalBell::new(io::stdout())) as Box<dyn SoundBackend>);
    let mut audio = AudioManager::new(backend);
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut session = Session::new(seed);
    let frame = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let mut next_frame = Instant::now();

    loop {
        // Input (non-blocking)
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some((key, action)) = input::translate(&key) {
                        keys.handle(key, action);
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }
        if keys.quit_requested() {
            break;
        }

        // Update
        let events = session.step(&keys.sample());
        audio.play_all(&events);

        // Render
        let hud = Hud {
            show_score: settings.show_score,
            status: settings
                .show_debug
                .then(|| format!("tick {} seed {}", session.ticks(), session.seed())),
        };
        renderer.draw(&session.snapshot(), &hud)?;

        // Frame pacing
        next_frame += frame;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks
            next_frame = now;
        }
    }

    log::info!(
        "Quit after {} game(s), last score {}%",
        session.games_played(),
        session.state().score
    );
    Ok(())
}
