//! Defines the model for a day's balance record.

use serde::{Deserialize, Deserializer, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{CalendarKey, Error};

/// The opening and closing balances of gold, silver and cash for one
/// calendar day.
///
/// Serialized with camelCase field names. Numeric fields that are missing or
/// `null` in a stored document read as zero. A missing or unreadable `date`
/// reads as the Unix epoch since only the balances are carried forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    /// When the record was created. This is not the business date, which is
    /// the record's key.
    #[serde(
        serialize_with = "time::serde::rfc3339::serialize",
        deserialize_with = "creation_time_or_epoch",
        default = "unix_epoch"
    )]
    pub date: OffsetDateTime,
    /// Gold held at the start of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub opening_gold: f64,
    /// Silver held at the start of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub opening_silver: f64,
    /// Cash held at the start of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub opening_cash: f64,
    /// Gold held at the end of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub closing_gold: f64,
    /// Silver held at the end of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub closing_silver: f64,
    /// Cash held at the end of the day.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub closing_cash: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

fn creation_time_or_epoch<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|text| OffsetDateTime::parse(text, &Rfc3339).ok())
        .unwrap_or_else(unix_epoch))
}

impl BalanceRecord {
    /// Start a new day from the previous day's record.
    ///
    /// Each opening value is the previous closing value, or zero when there
    /// is no previous record. Closing values start equal to the opening
    /// values since no transactions have happened yet.
    pub fn carry_forward(previous: Option<&BalanceRecord>, now: OffsetDateTime) -> Self {
        let (gold, silver, cash) = previous
            .map(|record| (record.closing_gold, record.closing_silver, record.closing_cash))
            .unwrap_or((0.0, 0.0, 0.0));

        Self {
            date: now,
            opening_gold: gold,
            opening_silver: silver,
            opening_cash: cash,
            closing_gold: gold,
            closing_silver: silver,
            closing_cash: cash,
        }
    }

    /// Encode the record as a JSON document.
    ///
    /// # Errors
    /// Returns [Error::NonFiniteBalance] if a balance is NaN or infinite,
    /// since JSON cannot represent it.
    pub fn to_document(&self) -> Result<String, Error> {
        for (field, value) in [
            ("openingGold", self.opening_gold),
            ("openingSilver", self.opening_silver),
            ("openingCash", self.opening_cash),
            ("closingGold", self.closing_gold),
            ("closingSilver", self.closing_silver),
            ("closingCash", self.closing_cash),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFiniteBalance(field.to_owned()));
            }
        }

        serde_json::to_string(self).map_err(|error| Error::StoreUnavailable(error.to_string()))
    }

    /// Decode the JSON document stored under `key`.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if the document is not a balance
    /// record, e.g. a balance is not a number.
    pub fn from_document(key: &CalendarKey, document: &str) -> Result<Self, Error> {
        serde_json::from_str(document).map_err(|error| Error::MalformedRecord {
            key: key.to_string(),
            reason: error.to_string(),
        })
    }
}
