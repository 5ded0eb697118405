//! Contains the SQLite backend for the balance store.

mod balance;

pub use balance::SQLiteBalanceStore;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Creates a [SQLiteBalanceStore] over `collection` in `db_connection`.
///
/// This function will modify the database by adding the store's table if it
/// does not exist yet.
pub fn create_balance_store(
    db_connection: Connection,
    collection: &str,
) -> Result<SQLiteBalanceStore, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(SQLiteBalanceStore::new(connection, collection))
}

/// Opens the SQLite database at `db_path` and creates a [SQLiteBalanceStore]
/// over `collection`.
pub fn open_balance_store(db_path: &Path, collection: &str) -> Result<SQLiteBalanceStore, Error> {
    tracing::debug!("Opening balance store at {db_path:?}");
    let connection = Connection::open(db_path)?;

    create_balance_store(connection, collection)
}

#[cfg(test)]
mod open_balance_store_tests {
    use time::macros::{date, datetime};

    use crate::{
        CalendarKey, FixedClock, UpdateOutcome, UpdaterConfig, stores::BalanceStore,
        update_daily_balance,
    };

    use super::open_balance_store;

    #[test]
    fn records_persist_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("balances.db");
        let key = CalendarKey::new(date!(2025 - 06 - 15));

        {
            let mut store = open_balance_store(&db_path, "daily_balances").unwrap();
            let clock = FixedClock(datetime!(2025 - 06 - 15 00:05 UTC));
            let outcome = update_daily_balance(&mut store, &clock, &UpdaterConfig::default());
            assert_eq!(outcome, Ok(UpdateOutcome::Created(key)));
        }

        let store = open_balance_store(&db_path, "daily_balances").unwrap();
        assert_eq!(store.contains(&key), Ok(true));
    }

    #[test]
    fn skip_existing_twice_against_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("balances.db");
        let mut store = open_balance_store(&db_path, "daily_balances").unwrap();
        let key = CalendarKey::new(date!(2025 - 06 - 15));
        let config = UpdaterConfig::default();

        update_daily_balance(
            &mut store,
            &FixedClock(datetime!(2025 - 06 - 15 00:05 UTC)),
            &config,
        )
        .unwrap();
        let first = store.get_document(&key).unwrap();
        let second = update_daily_balance(
            &mut store,
            &FixedClock(datetime!(2025 - 06 - 15 12:00 UTC)),
            &config,
        );

        assert_eq!(second, Ok(UpdateOutcome::SkippedExisting(key)));
        assert_eq!(store.get_document(&key).unwrap(), first);
    }
}
