//! Command-line entry point over `campcore`.
//!
//! # Responsibility
//! - Open the configured database, optionally seed it, and print wire models
//!   as JSON.
//! - Translate service errors into exit codes using their transport status.
//!
//! Usage: `campcore_cli <ping|seed|camps|search|talks|speakers> [args]`

use campcore::{
    init_logging, init_stderr_logging, CampService, CoreConfig, ServiceError, SqliteCampStore,
    TalkService,
};
use chrono::NaiveDate;
use log::error;
use serde::Serialize;
use std::process::ExitCode;

const USAGE: &str = "usage: campcore_cli ping
       campcore_cli seed
       campcore_cli camps [--talks]
       campcore_cli search <YYYY-MM-DD> [--talks]
       campcore_cli talks <moniker> [--speakers]
       campcore_cli speakers <moniker>";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().map(String::as_str).ok_or(USAGE)?;
    if command == "ping" {
        println!("campcore ping={}", campcore::ping());
        println!("campcore version={}", campcore::core_version());
        return Ok(());
    }

    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    match config.log_dir.as_ref() {
        Some(dir) => init_logging(config.log_level, &dir.to_string_lossy())?,
        None => init_stderr_logging(config.log_level)?,
    }
    let store = SqliteCampStore::open(&config.db_path).map_err(|err| {
        error!("event=cli_open module=cli status=error error={err}");
        format!("failed to open `{}`: {err}", config.db_path.display())
    })?;

    let flag = |name: &str| args.iter().skip(1).any(|arg| arg == name);
    let positional = || {
        args.get(1)
            .filter(|arg| !arg.starts_with("--"))
            .map(String::as_str)
            .ok_or(USAGE.to_string())
    };

    match command {
        "seed" => {
            let seeded = store
                .seed_sample_data()
                .await
                .map_err(|err| err.to_string())?;
            println!("seeded={seeded}");
            Ok(())
        }
        "camps" => {
            let service = CampService::new(store.repository());
            print_json(service.list_camps(flag("--talks")).await)
        }
        "search" => {
            let date = NaiveDate::parse_from_str(positional()?, "%Y-%m-%d")
                .map_err(|err| format!("invalid date: {err}"))?;
            let service = CampService::new(store.repository());
            print_json(service.search_by_date(date, flag("--talks")).await)
        }
        "talks" => {
            let service = TalkService::new(store.repository());
            print_json(service.list_talks(positional()?, flag("--speakers")).await)
        }
        "speakers" => {
            let service = CampService::new(store.repository());
            print_json(service.list_speakers(positional()?).await)
        }
        _ => Err(USAGE.to_string()),
    }
}

fn print_json<T: Serialize>(result: Result<T, ServiceError>) -> Result<(), String> {
    let value = result.map_err(|err| {
        format!("{} {}", err.status().as_u16(), err.client_message())
    })?;
    let json = serde_json::to_string_pretty(&value).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}
