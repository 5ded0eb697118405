use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use daily_balance::{
    Error, ExistingRecordPolicy, MissingPreviousPolicy, StoreCredentials, SystemClock,
    UpdaterConfig, setup_logging, stores::sqlite::open_balance_store, update_daily_balance,
};

/// Open today's balance record with yesterday's closing balances.
///
/// Intended to be run once a day by a scheduler.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the store credentials JSON. Falls back to the
    /// DAILY_BALANCE_CREDENTIALS environment variable.
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// File path to a JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to do when yesterday's record is missing.
    #[arg(long, value_enum)]
    on_missing_previous: Option<MissingPreviousPolicy>,

    /// What to do when today's record already exists.
    #[arg(long, value_enum)]
    on_existing: Option<ExistingRecordPolicy>,

    /// The canonical timezone in which days are counted, e.g. "Pacific/Auckland".
    #[arg(long)]
    timezone: Option<String>,

    /// Log debug messages, including the record that is written.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Failed to update balance: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    tracing::info!("Balance update started.");

    let credentials = StoreCredentials::load(args.credentials.as_deref())?;
    let config = load_config(&args)?;

    let mut store = open_balance_store(&credentials.database_path, &credentials.collection)?;
    let outcome = update_daily_balance(&mut store, &SystemClock, &config)?;

    tracing::info!("Balance update finished: {outcome:?}");

    Ok(())
}

fn load_config(args: &Args) -> Result<UpdaterConfig, Error> {
    let config = match &args.config {
        Some(path) => UpdaterConfig::from_file(path)?,
        None => UpdaterConfig::default(),
    }
    .with_overrides(
        args.on_missing_previous,
        args.on_existing,
        args.timezone.as_deref(),
    );

    tracing::debug!("Using {config:?}");

    Ok(config)
}
