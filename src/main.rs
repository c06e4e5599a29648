use std::env;
use std::process::ExitCode;

use dvdrental_report::logging::LogConfig;
use dvdrental_report::{parse_args, run, Config};

const USAGE: &str = "Usage: dvdrental-report [rentals-and-films|authors] [CONFIG_PATH]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let (mode, config_path) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            LogConfig::default().init();
            tracing::error!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Logging is configured from the file, so it starts once the file is read.
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            LogConfig::default().init();
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    config.logging.init();

    match run(&config, mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
