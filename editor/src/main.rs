use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use isolationist_editor::Preferences;
use isolationist_editor::scenario::{Replay, Scenario};

/// Replays a recorded editor session against the isolate and hide commands.
#[derive(Parser, Debug)]
#[command(
    name = "isolationist-replay",
    about = "Replay a scenario through the isolate and hide commands",
    long_about = "Builds the scene described in a scenario TOML file, feeds its steps \
        (selection changes, key releases, menu commands, play mode, undo/redo) \
        to the editor commands and prints the resulting hierarchy.\n\n\
        Active nodes print as [x], hidden nodes as [ ].\n\n\
        EXAMPLES:\n\
          isolationist-replay scenario.toml\n\
          isolationist-replay scenario.toml --prefs shortcuts.toml --trace",
    version
)]
struct Args {
    /// Scenario file to replay.
    scenario: PathBuf,

    /// Shortcut preferences, overriding the scenario's own.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Print the hierarchy after every step.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = match Scenario::load(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut replay = match Replay::new(&scenario) {
        Ok(replay) => replay,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &args.prefs {
        replay.set_preferences(Preferences::load_or_default(path));
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        if let Err(e) = replay.step(step) {
            log::error!("step {}: {e}", i + 1);
            return ExitCode::FAILURE;
        }
        if args.trace {
            println!("-- step {}: {step:?}", i + 1);
            print!("{}", replay.render_tree());
        }
    }

    if !args.trace {
        print!("{}", replay.render_tree());
    }
    ExitCode::SUCCESS
}
