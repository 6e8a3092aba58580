/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::{AppConfig, DisplayConfig, LogConfig};
use domain::input::InputEvent;
use sim::engine::Engine;
use sim::event::FrameEvent;
use sim::screen::ScreenId;
use ui::gamepad::GamepadInput;
use ui::input::KeyboardInput;
use ui::renderer::Renderer;
use ui::sound::{SoundEngine, Sfx};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, PartialEq)]
struct Cli {
    screen: Option<ScreenId>,
    config: Option<PathBuf>,
    help: bool,
    version: bool,
}

fn print_help() {
    eprintln!("wopr {} - retro WOPR terminal", VERSION);
    eprintln!();
    eprintln!("Usage: wopr [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --screen <NAME>       Start at a screen: login, prompt, chess, war, tictactoe");
    eprintln!("  --config <PATH>       Read settings from PATH instead of config.toml");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter                 Submit line / place mark");
    eprintln!("  Esc                   Back (quit at login and prompt)");
    eprintln!("  Arrows / WASD         Move selection (tic-tac-toe)");
    eprintln!("  Ctrl+C                Quit");
    eprintln!();
    eprintln!("Configuration: config.toml next to the executable, in the working");
    eprintln!("directory, or in ~/.config/wopr");
    eprintln!("Log file: ~/.wopr/wopr.log (RUST_LOG overrides the level)");
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut cli = Cli::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => cli.help = true,
            "-v" | "--version" => cli.version = true,
            "--screen" => {
                i += 1;
                let name = args.get(i).ok_or("Missing screen argument")?;
                cli.screen = Some(
                    ScreenId::from_name(name).ok_or_else(|| format!("Unknown screen: {}", name))?,
                );
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config path")?;
                cli.config = Some(PathBuf::from(path));
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Log to a file; the terminal belongs to the renderer.
fn init_logging(cfg: &LogConfig) {
    if let Some(parent) = cfg.file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.file)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&cfg.level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };
    if cli.help {
        print_help();
        return Ok(());
    }
    if cli.version {
        eprintln!("wopr {}", VERSION);
        return Ok(());
    }

    let (config, config_err) = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => (c, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&config.log);
    info!(version = VERSION, "wopr starting");
    if let Some(e) = &config_err {
        warn!(error = %e, "config unusable, using defaults");
    }

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let viewport = config.display.resolve_viewport(cols, rows);
    let start = cli.screen.unwrap_or(ScreenId::Login);
    let mut engine = Engine::new(&config.terminal, viewport, start);

    let mut renderer = Renderer::new(&config.display);
    renderer.init().context("terminal init failed")?;

    let sound = SoundEngine::new();
    let result = frame_loop(&mut engine, &mut renderer, sound.as_ref(), &config);

    // Teardown runs even when the loop failed.
    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    info!("wopr exiting");

    if let Some(e) = config_err {
        eprintln!("warning: {e}; defaults were used");
    }
    result
}

fn frame_loop(
    engine: &mut Engine,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut kb = KeyboardInput::new();
    let mut gp = GamepadInput::new(&config.gamepad);
    let period = config.display.frame_period();
    let mut last = Instant::now();

    if gp.connected {
        info!("gamepad detected");
    }

    while engine.is_running() {
        let frame_start = Instant::now();

        let mut events: Vec<InputEvent> = kb
            .drain()
            .iter()
            .map(|e| fit_viewport(e, &config.display))
            .collect();
        events.extend_from_slice(gp.poll());
        engine.handle_events(&events);

        let now = Instant::now();
        engine.update(now.duration_since(last).as_secs_f64());
        last = now;

        process_frame_events(sound, &engine.take_events());
        if !engine.is_running() {
            break;
        }

        renderer.render(engine).context("render failed")?;

        if let Some(rest) = period.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
    Ok(())
}

/// Host terminal size → drawing area.
fn fit_viewport(event: &InputEvent, display: &DisplayConfig) -> InputEvent {
    match event {
        InputEvent::Resize { width, height } => {
            let (width, height) = display.resolve_viewport(*width, *height);
            InputEvent::Resize { width, height }
        }
        other => other.clone(),
    }
}

fn process_frame_events(sound: Option<&SoundEngine>, events: &[FrameEvent]) {
    for event in events {
        match event {
            FrameEvent::KeyClick => {}
            FrameEvent::AccessGranted => info!("access granted"),
            FrameEvent::AccessDenied => info!("access denied"),
            FrameEvent::DefconChanged(level) => info!(level, "defcon changed"),
            FrameEvent::SimulationComplete => info!("war simulation complete"),
            other => debug!(event = ?other),
        }
        if let Some(sfx) = sound {
            if let Some(effect) = Sfx::for_event(event) {
                sfx.play(effect);
            }
        }
    }
}
