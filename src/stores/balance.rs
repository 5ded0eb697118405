//! Defines the store for daily balance records.

use crate::{CalendarKey, Error, record::BalanceRecord};

/// Reads and writes balance records keyed by calendar date within a single
/// collection.
pub trait BalanceStore {
    /// Get the record stored under `key`, if any.
    fn get(&self, key: &CalendarKey) -> Result<Option<BalanceRecord>, Error>;

    /// Whether a record is stored under `key`.
    ///
    /// The record is not decoded, so this succeeds even for a malformed
    /// document.
    fn contains(&self, key: &CalendarKey) -> Result<bool, Error>;

    /// Store `record` under `key`, replacing any existing record.
    fn set(&mut self, key: &CalendarKey, record: &BalanceRecord) -> Result<(), Error>;

    /// Store `record` under `key` only if no record exists there yet.
    ///
    /// The existence check and the write happen atomically. Returns `false`
    /// and leaves the store untouched if a record was already present.
    fn create_if_absent(&mut self, key: &CalendarKey, record: &BalanceRecord)
    -> Result<bool, Error>;
}
