use clap::{CommandFactory, Parser};
use console::style;
use emlmr::app;
use emlmr::config::{Options, ReportConfig};
use emlmr::error::{AppError, ConfigError};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EMLMR_LOG";

fn main() -> ExitCode {
    init_tracing();

    match try_main(Options::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error @ AppError::Config(ConfigError::NoFiles)) => {
            println!("{}\n", style("No se especificaron archivos").red().bold());
            if let Err(help_error) = Options::command().print_help() {
                eprintln!("{help_error}");
            }
            ExitCode::from(error.exit_code())
        }
        Err(error @ AppError::Config(_)) => {
            eprintln!("{} {error}\n", style("error:").for_stderr().red().bold());
            eprintln!("{}", Options::command().render_usage());
            ExitCode::from(error.exit_code())
        }
        Err(error) => {
            eprintln!("{} {error}", style("error:").for_stderr().red().bold());
            ExitCode::from(error.exit_code())
        }
    }
}

fn try_main(options: Options) -> Result<(), AppError> {
    let config = ReportConfig::from_options(options)?;
    app::run(&config)?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
