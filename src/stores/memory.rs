//! Implements an in-memory balance store.

use std::collections::HashMap;

use crate::{CalendarKey, Error, record::BalanceRecord, stores::BalanceStore};

/// Keeps balance records as JSON documents in a hash map.
///
/// Useful as a stand-in for a real store in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBalanceStore {
    documents: HashMap<CalendarKey, String>,
    writes: usize,
}

impl InMemoryBalanceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw JSON document under `key`, bypassing encoding.
    pub fn insert_document(&mut self, key: CalendarKey, document: &str) {
        self.documents.insert(key, document.to_owned());
    }

    /// The raw JSON document stored under `key`.
    pub fn document(&self, key: &CalendarKey) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }

    /// The number of records in the store.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// How many times a record has been written through [BalanceStore].
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn get(&self, key: &CalendarKey) -> Result<Option<BalanceRecord>, Error> {
        self.documents
            .get(key)
            .map(|document| BalanceRecord::from_document(key, document))
            .transpose()
    }

    fn contains(&self, key: &CalendarKey) -> Result<bool, Error> {
        Ok(self.documents.contains_key(key))
    }

    fn set(&mut self, key: &CalendarKey, record: &BalanceRecord) -> Result<(), Error> {
        let document = record.to_document()?;
        self.documents.insert(*key, document);
        self.writes += 1;

        Ok(())
    }

    fn create_if_absent(
        &mut self,
        key: &CalendarKey,
        record: &BalanceRecord,
    ) -> Result<bool, Error> {
        if self.documents.contains_key(key) {
            return Ok(false);
        }

        self.set(key, record)?;

        Ok(true)
    }
}
