use std::path::PathBuf;
use std::process::ExitCode;

use image_sorter::app::controller::SorterController;
use image_sorter::infra::config::{ConfigStore, DEFAULT_CONFIG_PATH};
use image_sorter::{logging, ui};

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();

    match parse_command(&args).and_then(run_command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            log::error!("{msg}");
            ExitCode::from(1)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui { config_path: PathBuf },
    Help,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-c" | "--config" => {
                let value = rest
                    .next()
                    .ok_or_else(|| CommandError::Usage("missing config path".to_string()))?;
                config_path = PathBuf::from(value);
            }
            other => return Err(CommandError::Usage(format!("unknown argument: {other}"))),
        }
    }

    Ok(Command::Ui { config_path })
}

fn run_command(command: Command) -> Result<(), CommandError> {
    match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Ui { config_path } => {
            let mut controller = SorterController::new(ConfigStore::new(config_path));
            controller.bootstrap().map_err(|error| {
                CommandError::Runtime(format!("failed to bootstrap image-sorter: {error}"))
            })?;
            ui::app_shell::launch_window(controller).map_err(CommandError::Runtime)
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  image-sorter [--config <path>]");
    println!();
    println!("shortcuts: Ctrl+Z undo, Ctrl+F search buttons, Ctrl+T add button, Esc leave fullscreen");
}
