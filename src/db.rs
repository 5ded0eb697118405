/*! Schema setup for the SQLite document store. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, stores::sqlite::SQLiteBalanceStore};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table(s) for the type, if they do not already exist.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// Create the tables for the balance store.
///
/// Safe to call on a database that has already been initialized.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteBalanceStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
