//! Cell Arcade entry point
//!
//! Parses the command line, builds the simulation and runs it in the
//! terminal until the player quits.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use cell_arcade::platform::LoopDriver;
use cell_arcade::platform::terminal::{CrosstermInput, TerminalRenderer, TerminalSession};
use cell_arcade::{GameMode, Settings, Simulation};

const USAGE: &str = "usage: cell-arcade [breakout|invaders] [settings.json]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    mode: GameMode,
    settings_path: Option<PathBuf>,
}

/// `None` when help was asked for
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliArgs>> {
    let mut mode = None;
    let mut settings_path = None;

    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Ok(None);
        }
        if let Some(parsed) = GameMode::from_str(&arg)
            && mode.is_none()
            && settings_path.is_none()
        {
            mode = Some(parsed);
        } else if settings_path.is_none() {
            settings_path = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument '{arg}'\n{USAGE}");
        }
    }

    Ok(Some(CliArgs {
        mode: mode.unwrap_or_default(),
        settings_path,
    }))
}

fn run() -> Result<()> {
    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let preset = Settings::from_preset(args.mode);
    let settings = match &args.settings_path {
        Some(path) => Settings::load(path, &preset)?,
        None => preset,
    };
    let mut sim = Simulation::new(settings).context("invalid settings")?;
    let driver = LoopDriver::new(sim.settings());

    let arena = sim.state().arena;
    let session = TerminalSession::enter()?;
    // Playfield plus status and banner lines
    session.check_fits(arena.width() as usize, arena.height() as usize + 2)?;

    let summary = driver.run(&mut sim, &mut CrosstermInput, &mut TerminalRenderer::stdout());
    drop(session);

    let summary = summary?;
    log::info!(
        "Exited after {} ticks: {:?}, score {}",
        summary.ticks,
        summary.outcome,
        summary.score
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("cell-arcade: {err:#}");
            ExitCode::FAILURE
        }
    }
}
