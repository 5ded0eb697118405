use std::{error::Error, path::PathBuf, process::exit};

use clap::Parser;
use time::OffsetDateTime;

use daily_balance::{
    BalanceRecord, CalendarKey, DEFAULT_COLLECTION,
    stores::{BalanceStore, sqlite::open_balance_store},
};

/// A utility for writing a balance record into a store for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long)]
    db_path: PathBuf,

    /// The collection to write to.
    #[arg(long, default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// The day of the record, formatted as YYYY-MM-DD.
    #[arg(long)]
    date: CalendarKey,

    /// Gold held at the end of the day.
    #[arg(long, default_value_t = 0.0)]
    gold: f64,

    /// Silver held at the end of the day.
    #[arg(long, default_value_t = 0.0)]
    silver: f64,

    /// Cash held at the end of the day.
    #[arg(long, default_value_t = 0.0)]
    cash: f64,
}

/// Create a closed day's balance record.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.db_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Database path must include a file extension (e.g., 'balances.db').");
            exit(1);
        }
    }

    println!("Opening database at {:#?}", args.db_path);
    let mut store = open_balance_store(&args.db_path, &args.collection)?;

    let record = BalanceRecord {
        date: OffsetDateTime::now_utc(),
        opening_gold: args.gold,
        opening_silver: args.silver,
        opening_cash: args.cash,
        closing_gold: args.gold,
        closing_silver: args.silver,
        closing_cash: args.cash,
    };

    if !store.create_if_absent(&args.date, &record)? {
        return Err(daily_balance::Error::RecordAlreadyExists(args.date.to_string()).into());
    }

    println!("Created balance record for {}", args.date);

    Ok(())
}
