//! Loads the credentials that locate the balance store.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::Error;

/// The environment variable that may hold the credentials as JSON, e.g. when
/// injected as a secret by the scheduler.
pub const CREDENTIALS_ENV_VAR: &str = "DAILY_BALANCE_CREDENTIALS";

/// The collection used when the credentials do not name one.
pub const DEFAULT_COLLECTION: &str = "daily_balances";

/// Where the balance store lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCredentials {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// The collection holding the daily balance records.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_owned()
}

impl StoreCredentials {
    /// Load credentials from the key file at `path`, or from
    /// [CREDENTIALS_ENV_VAR] when no path is given.
    ///
    /// # Errors
    /// Returns [Error::MissingCredential] if neither source is available or
    /// the JSON is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env_value(env::var(CREDENTIALS_ENV_VAR).ok()),
        }
    }

    /// Read credentials from a JSON key file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|error| {
            Error::MissingCredential(format!("could not read {path:?}: {error}"))
        })?;

        Self::from_json(&text)
    }

    /// Parse credentials from the value of [CREDENTIALS_ENV_VAR].
    pub fn from_env_value(value: Option<String>) -> Result<Self, Error> {
        match value {
            Some(text) if !text.trim().is_empty() => Self::from_json(&text),
            _ => Err(Error::MissingCredential(format!(
                "no credentials file given and {CREDENTIALS_ENV_VAR} is not set"
            ))),
        }
    }

    fn from_json(text: &str) -> Result<Self, Error> {
        let credentials: Self = serde_json::from_str(text)
            .map_err(|error| Error::MissingCredential(error.to_string()))?;

        if credentials.collection.trim().is_empty() {
            return Err(Error::MissingCredential(
                "the collection name cannot be empty".to_owned(),
            ));
        }

        Ok(credentials)
    }
}

#[cfg(test)]
mod store_credentials_tests {
    use std::{io::Write, path::PathBuf};

    use crate::Error;

    use super::StoreCredentials;

    #[test]
    fn reads_key_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"databasePath": "/var/lib/balances.db", "collection": "balances"}}"#
        )
        .unwrap();

        let got = StoreCredentials::load(Some(file.path()));

        assert_eq!(
            got,
            Ok(StoreCredentials {
                database_path: PathBuf::from("/var/lib/balances.db"),
                collection: "balances".to_owned(),
            })
        );
    }

    #[test]
    fn collection_defaults_to_daily_balances() {
        let got = StoreCredentials::from_env_value(Some(
            r#"{"databasePath": "balances.db"}"#.to_owned(),
        ))
        .unwrap();

        assert_eq!(got.collection, "daily_balances");
    }

    #[test]
    fn missing_key_file_is_missing_credential() {
        let dir = tempfile::tempdir().unwrap();

        let got = StoreCredentials::load(Some(&dir.path().join("serviceAccountKey.json")));

        assert!(
            matches!(got, Err(Error::MissingCredential(_))),
            "want MissingCredential, got {got:?}"
        );
    }

    #[test]
    fn unset_env_value_is_missing_credential() {
        for value in [None, Some(String::new()), Some("   ".to_owned())] {
            let got = StoreCredentials::from_env_value(value.clone());

            assert!(
                matches!(got, Err(Error::MissingCredential(_))),
                "want MissingCredential for {value:?}, got {got:?}"
            );
        }
    }

    #[test]
    fn malformed_json_is_missing_credential() {
        let got = StoreCredentials::from_env_value(Some(r#"{"databasePath": 42}"#.to_owned()));

        assert!(
            matches!(got, Err(Error::MissingCredential(_))),
            "want MissingCredential, got {got:?}"
        );
    }

    #[test]
    fn empty_collection_is_missing_credential() {
        let got = StoreCredentials::from_env_value(Some(
            r#"{"databasePath": "balances.db", "collection": ""}"#.to_owned(),
        ));

        assert!(
            matches!(got, Err(Error::MissingCredential(_))),
            "want MissingCredential, got {got:?}"
        );
    }
}
