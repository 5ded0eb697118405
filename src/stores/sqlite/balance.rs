//! Implements a SQLite backed balance store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::{
    CalendarKey, Error, db::CreateTable, record::BalanceRecord, stores::BalanceStore,
};

/// Stores balance records as JSON documents in one collection of a SQLite
/// database.
#[derive(Debug, Clone)]
pub struct SQLiteBalanceStore {
    connection: Arc<Mutex<Connection>>,
    collection: String,
}

impl SQLiteBalanceStore {
    /// Create a new store over `collection` from the SQLite `connection`.
    ///
    /// The table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>, collection: &str) -> Self {
        Self {
            connection,
            collection: collection.to_owned(),
        }
    }

    /// The raw JSON document stored under `key`.
    pub fn get_document(&self, key: &CalendarKey) -> Result<Option<String>, Error> {
        let document = self
            .lock()?
            .prepare(
                "SELECT document FROM document
                WHERE collection = :collection AND key = :key;",
            )?
            .query_row(
                &[
                    (":collection", self.collection.as_str()),
                    (":key", key.to_string().as_str()),
                ],
                |row| row.get(0),
            )
            .optional()?;

        Ok(document)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::StoreUnavailable("could not acquire the database lock".to_owned()))
    }
}

impl CreateTable for SQLiteBalanceStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS document (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                document TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            )",
            (),
        )?;

        Ok(())
    }
}

impl BalanceStore for SQLiteBalanceStore {
    fn get(&self, key: &CalendarKey) -> Result<Option<BalanceRecord>, Error> {
        self.get_document(key)?
            .map(|document| BalanceRecord::from_document(key, &document))
            .transpose()
    }

    fn contains(&self, key: &CalendarKey) -> Result<bool, Error> {
        let exists = self.lock()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM document WHERE collection = ?1 AND key = ?2);",
            (&self.collection, key.to_string()),
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn set(&mut self, key: &CalendarKey, record: &BalanceRecord) -> Result<(), Error> {
        let document = record.to_document()?;

        self.lock()?.execute(
            "INSERT INTO document (collection, key, document)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(collection, key) DO UPDATE SET
                    document = excluded.document;",
            (&self.collection, key.to_string(), document),
        )?;

        Ok(())
    }

    fn create_if_absent(
        &mut self,
        key: &CalendarKey,
        record: &BalanceRecord,
    ) -> Result<bool, Error> {
        let document = record.to_document()?;

        let rows_affected = self.lock()?.execute(
            "INSERT INTO document (collection, key, document)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(collection, key) DO NOTHING;",
            (&self.collection, key.to_string(), document),
        )?;

        Ok(rows_affected == 1)
    }
}

#[cfg(test)]
mod sqlite_balance_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        CalendarKey, Error, db::CreateTable, record::BalanceRecord, stores::BalanceStore,
    };

    use super::SQLiteBalanceStore;

    fn get_test_store() -> SQLiteBalanceStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteBalanceStore::create_table(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        SQLiteBalanceStore::new(connection, "daily_balances")
    }

    fn test_record(gold: f64) -> BalanceRecord {
        BalanceRecord {
            date: datetime!(2025 - 05 - 31 00:01 UTC),
            opening_gold: gold,
            opening_silver: 5.0,
            opening_cash: 100.0,
            closing_gold: gold,
            closing_silver: 5.0,
            closing_cash: 100.0,
        }
    }

    #[test]
    fn get_missing_record_returns_none() {
        let store = get_test_store();

        let got = store.get(&CalendarKey::new(date!(2025 - 05 - 31)));

        assert_eq!(got, Ok(None));
    }

    #[test]
    fn contains_does_not_decode_document() {
        let store = get_test_store();
        store
            .connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO document (collection, key, document) VALUES (?1, ?2, ?3)",
                ("daily_balances", "2025-05-31", "not json"),
            )
            .unwrap();

        let got = store.contains(&CalendarKey::new(date!(2025 - 05 - 31)));

        assert_eq!(got, Ok(true));
    }

    #[test]
    fn can_set_and_get_record() {
        let mut store = get_test_store();
        let key = CalendarKey::new(date!(2025 - 05 - 31));
        let want = test_record(10.0);

        store.set(&key, &want).expect("Could not set balance record");
        let got = store.get(&key).expect("Could not get balance record");

        assert_eq!(Some(want), got);
    }

    #[test]
    fn set_overwrites_existing_record() {
        let mut store = get_test_store();
        let key = CalendarKey::new(date!(2025 - 05 - 31));
        store.set(&key, &test_record(1.0)).unwrap();

        store.set(&key, &test_record(2.0)).unwrap();

        assert_eq!(store.get(&key), Ok(Some(test_record(2.0))));
    }

    #[test]
    fn create_if_absent_creates_missing_record() {
        let mut store = get_test_store();
        let key = CalendarKey::new(date!(2025 - 05 - 31));

        let created = store.create_if_absent(&key, &test_record(3.0));

        assert_eq!(created, Ok(true));
        assert_eq!(store.get(&key), Ok(Some(test_record(3.0))));
    }

    #[test]
    fn create_if_absent_keeps_existing_record() {
        let mut store = get_test_store();
        let key = CalendarKey::new(date!(2025 - 05 - 31));
        store.set(&key, &test_record(1.0)).unwrap();
        let before = store.get_document(&key).unwrap();

        let created = store.create_if_absent(&key, &test_record(2.0));

        assert_eq!(created, Ok(false));
        assert_eq!(store.get_document(&key).unwrap(), before);
    }

    #[test]
    fn collections_are_separate() {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteBalanceStore::create_table(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));
        let mut daily = SQLiteBalanceStore::new(connection.clone(), "daily_balances");
        let other = SQLiteBalanceStore::new(connection, "archived_balances");
        let key = CalendarKey::new(date!(2025 - 05 - 31));

        daily.set(&key, &test_record(1.0)).unwrap();

        assert_eq!(other.get(&key), Ok(None));
    }

    #[test]
    fn malformed_document_is_an_error() {
        let store = get_test_store();
        store
            .connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO document (collection, key, document) VALUES (?1, ?2, ?3)",
                ("daily_balances", "2025-05-31", "{\"closingCash\": []}"),
            )
            .unwrap();

        let got = store.get(&CalendarKey::new(date!(2025 - 05 - 31)));

        assert!(
            matches!(got, Err(Error::MalformedRecord { .. })),
            "want MalformedRecord, got {got:?}"
        );
    }

    #[test]
    fn missing_table_is_store_unavailable() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let store = SQLiteBalanceStore::new(connection, "daily_balances");

        let got = store.get(&CalendarKey::new(date!(2025 - 05 - 31)));

        assert!(
            matches!(got, Err(Error::StoreUnavailable(_))),
            "want StoreUnavailable, got {got:?}"
        );
    }
}
