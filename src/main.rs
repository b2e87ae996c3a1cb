use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use subnet_planner::cli::Cli;
use subnet_planner::config::Config;
use subnet_planner::logging::init_logging;
use subnet_planner::run;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Configuration error:".red());
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("{} {e}", "Logging disabled:".yellow());
    }
    log::info!("#Start main()");

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
