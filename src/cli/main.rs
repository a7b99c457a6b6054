//! Command-line interface entry point for `gymevo`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::{App, CommandError};
use gym_evolution::config::Config;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    // Config commands never touch the store
    let command = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &config, &defaults);
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = dispatch(&mut app, command).await;
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            app.report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(app: &mut App, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Config { .. } => Ok(()), // handled in main
        Command::Login { email, password } => commands::auth::login(app, &email, password).await,
        Command::Logout => {
            commands::auth::logout(app);
            Ok(())
        }
        Command::Students { subcommand } => commands::students::run(app, subcommand).await,
        Command::Evolution { subcommand } => commands::evolution::run(app, subcommand).await,
        Command::Report { subcommand } => commands::report::run(app, subcommand).await,
        Command::Payments { subcommand } => commands::payments::run(app, subcommand).await,
        Command::Dashboard => commands::dashboard::run(app).await,
    }
}
