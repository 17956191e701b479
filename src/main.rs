use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use termcolor::{ColorChoice, StandardStream};

use list_tree::cli::Cli;
use list_tree::config::{TraversalConfig, stdout_supports_color};
use list_tree::fs::RealFileSystem;
use list_tree::output::write_lines;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::new().filter_or("LT_LOG", "warn")).init();

    let cli = Cli::parse();
    let config = TraversalConfig::from_cli(&cli, stdout_supports_color());
    log::debug!("resolved configuration: {config:?}");

    let lines = match list_tree::run(&RealFileSystem, &config).await {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("lt: {err}");
            return ExitCode::from(1);
        }
    };

    let choice = if config.color_active {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    if let Err(err) = write_lines(&mut stdout, &lines) {
        if err.kind() == std::io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        eprintln!("lt: {err}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
