// src/main.rs
use anyhow::{bail, Context, Result};
use dependency_checkup::{config, Checkup, CheckupError};
use std::process::ExitCode;
use tracing::{error, info, warn};

const USAGE: &str =
    "usage: dependency-checkup [CONFIG] [--verbose|-v] [--json] [--check-all] [--deadline-ms N]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<String>,
    verbose: bool,
    json: bool,
    check_all: bool,
    deadline_ms: Option<u64>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Help,
}

fn parse_args<I: IntoIterator<Item = String>>(raw: I) -> Result<Command> {
    let mut args = Args::default();
    let mut iter = raw.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--check-all" => args.check_all = true,
            "--deadline-ms" => {
                let value = iter.next().context("--deadline-ms needs a value")?;
                args.deadline_ms = Some(value.parse().context("--deadline-ms must be a number")?);
            }
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') => bail!("unknown flag {}\n{}", flag, USAGE),
            path => args.config_path = Some(path.to_string()),
        }
    }

    Ok(Command::Run(args))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = match parse_args(std::env::args().skip(1))? {
        Command::Run(args) => args,
        Command::Help => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let mut settings = config::load_settings()?;
    settings.verbose |= args.verbose;
    settings.fail_fast &= !args.check_all;
    if let Some(deadline_ms) = args.deadline_ms {
        settings.deadline_ms = deadline_ms;
    }

    // Initialize tracing
    let level = if settings.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("dependency_checkup={}", level).parse()?)
                .add_directive("sqlx=warn".parse()?),
        )
        .init();

    let config_path = args
        .config_path
        .unwrap_or_else(|| "dependencies.yaml".to_string());

    let deps = match config::load_dependencies(&config_path).await {
        Ok(deps) => deps,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };
    info!("Dependencies file successfully loaded from {}", config_path);
    if deps.is_empty() {
        warn!("{} lists no dependencies; nothing to check", config_path);
    }

    let result = Checkup::from_settings(&settings).checkup(&deps).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match result.into_result() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(CheckupError::CheckupFailed { causes }) => {
            for cause in &causes {
                error!("{}", cause.summary(settings.verbose));
            }
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}
