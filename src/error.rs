//! Defines the crate level error type.

/// The errors that may occur while carrying balances forward.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The store credentials could not be found or could not be parsed.
    ///
    /// Callers should pass in a description of where the credentials were
    /// expected and what went wrong.
    #[error("missing or malformed store credentials: {0}")]
    MissingCredential(String),

    /// A read from or write to the balance store failed.
    ///
    /// The run should be abandoned. There is no retry.
    #[error("the balance store is unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored balance document could not be decoded.
    #[error("the balance record for {key} is malformed: {reason}")]
    MalformedRecord {
        /// The calendar key of the offending document.
        key: String,
        /// Why decoding failed.
        reason: String,
    },

    /// A balance is NaN or infinite and cannot be stored.
    #[error("the balance {0} is not a finite number")]
    NonFiniteBalance(String),

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A string could not be used as a calendar key.
    #[error("invalid calendar key \"{0}\", expected a date formatted as YYYY-MM-DD")]
    InvalidCalendarKey(String),

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A balance record already exists for the given day.
    ///
    /// The updater handles this through
    /// [ExistingRecordPolicy](crate::ExistingRecordPolicy), this is only
    /// returned by operations that refuse to replace a record.
    #[error("a balance record already exists for {0}")]
    RecordAlreadyExists(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StoreUnavailable(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn sql_errors_map_to_store_unavailable() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        assert!(
            matches!(error, Error::StoreUnavailable(_)),
            "want StoreUnavailable, got {error:?}"
        );
    }

    #[test]
    fn malformed_record_message_names_the_key() {
        let error = Error::MalformedRecord {
            key: "2025-01-31".to_owned(),
            reason: "invalid type".to_owned(),
        };

        assert_eq!(
            error.to_string(),
            "the balance record for 2025-01-31 is malformed: invalid type"
        );
    }
}
