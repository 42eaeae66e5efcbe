use clap::Parser;
use gofinances::args::{Args, Command};
use gofinances::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.locale(), init_args.currency())
                .await?
                .print()
        }
        Command::Login(login_args) => commands::login(Config::load(home).await?, login_args.clone())
            .await?
            .print(),
        Command::Logout => commands::logout(Config::load(home).await?).await?.print(),
        Command::Whoami => commands::whoami(Config::load(home).await?).await?.print(),
        Command::Record(record_args) => {
            commands::record(Config::load(home).await?, record_args.clone())
                .await?
                .print()
        }
        Command::Summary(summary_args) => {
            commands::summary(Config::load(home).await?, summary_args.clone())
                .await?
                .print()
        }
        Command::Schema => commands::schema().await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // Without RUST_LOG only this crate logs, at the requested level.
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
