//! Daily balance carry-forward.
//!
//! Once a day, today's gold, silver and cash balance record is opened with
//! yesterday's closing balances. Records live in a keyed document store, one
//! per calendar day, keyed by `YYYY-MM-DD`.
//!
//! The entry point is [update_daily_balance], which takes the store and the
//! clock as parameters so either can be swapped out, e.g. for an
//! [InMemoryBalanceStore](stores::InMemoryBalanceStore) and a
//! [FixedClock] in tests.

#![warn(missing_docs)]

mod calendar_key;
mod clock;
mod config;
mod credentials;
mod db;
mod error;
mod logging;
mod record;
mod timezone;
mod updater;

pub mod stores;

pub use calendar_key::{CalendarKey, today_and_yesterday};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DEFAULT_TIMEZONE, ExistingRecordPolicy, MissingPreviousPolicy, UpdaterConfig};
pub use credentials::{CREDENTIALS_ENV_VAR, DEFAULT_COLLECTION, StoreCredentials};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::setup_logging;
pub use record::BalanceRecord;
pub use timezone::get_offset_at;
pub use updater::{UpdateOutcome, update_daily_balance};
