use std::process::ExitCode;

use clap::Parser;
use codei::cli_args::{Cli, Commands};
use codei::CodeiError;
use codei::config::load_with_fallback;

mod commands;

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().map_err(|e| CodeiError::io(".", e))?;
    let stdout = std::io::stdout().lock();
    match cli.command {
        Commands::List(args) => {
            let args = load_with_fallback(args, &[])?;
            commands::run_list(args, stdout)?;
        }
        Commands::Create(args) => {
            let args = load_with_fallback(args, &["name"])?;
            commands::run_create(args, &cwd, stdout)?;
        }
        Commands::Init(args) => {
            let args = load_with_fallback(args, &["project_type"])?;
            commands::run_init(args, &cwd, stdout)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
