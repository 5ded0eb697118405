//! Carries the previous day's closing balances forward into today's opening
//! balances.

use crate::{
    BalanceRecord, Error,
    calendar_key::{CalendarKey, today_and_yesterday},
    clock::Clock,
    config::{ExistingRecordPolicy, MissingPreviousPolicy, UpdaterConfig},
    stores::BalanceStore,
    timezone::get_offset_at,
};

/// What a carry-forward run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Today's record did not exist and was created.
    Created(CalendarKey),
    /// Today's record existed and was replaced.
    Overwritten(CalendarKey),
    /// Today's record existed and was left untouched.
    SkippedExisting(CalendarKey),
    /// Yesterday's record was missing so nothing was written.
    SkippedMissingPrevious(CalendarKey),
}

/// Create today's balance record from yesterday's closing balances.
///
/// Days are counted in `config.timezone` at the instant given by `clock`.
/// The policies in `config` decide what happens when yesterday's record is
/// missing or today's record already exists. At most one write is made.
///
/// Under [ExistingRecordPolicy::Skip] the write is an atomic create, so a
/// concurrent run that wins the race leaves its record in place and this run
/// reports [UpdateOutcome::SkippedExisting].
///
/// # Errors
/// Returns an error if the timezone is invalid, or if the store cannot be
/// read or written. Nothing is retried.
pub fn update_daily_balance(
    store: &mut impl BalanceStore,
    clock: &impl Clock,
    config: &UpdaterConfig,
) -> Result<UpdateOutcome, Error> {
    let now = clock.now();
    let offset = get_offset_at(&config.timezone, now)?;
    let (today, yesterday) = today_and_yesterday(now, offset)?;

    tracing::info!("Today: {today}, yesterday: {yesterday} ({})", config.timezone);

    if config.on_existing == ExistingRecordPolicy::Skip && store.contains(&today)? {
        tracing::info!("Balance already exists for today: {today}");
        return Ok(UpdateOutcome::SkippedExisting(today));
    }

    let previous = store.get(&yesterday)?;

    if previous.is_none() {
        match config.on_missing_previous {
            MissingPreviousPolicy::Skip => {
                tracing::warn!("No balance data for yesterday: {yesterday}");
                return Ok(UpdateOutcome::SkippedMissingPrevious(today));
            }
            MissingPreviousPolicy::ZeroFill => {
                tracing::warn!("No balance data for yesterday: {yesterday}, opening at zero");
            }
        }
    }

    let record = BalanceRecord::carry_forward(previous.as_ref(), now);
    log_record(&today, &record);

    let outcome = match config.on_existing {
        ExistingRecordPolicy::Skip => {
            if store.create_if_absent(&today, &record)? {
                UpdateOutcome::Created(today)
            } else {
                tracing::info!("Balance for {today} was created by another run, leaving it as is");
                UpdateOutcome::SkippedExisting(today)
            }
        }
        ExistingRecordPolicy::Overwrite => {
            let existed = store.contains(&today)?;
            store.set(&today, &record)?;

            if existed {
                UpdateOutcome::Overwritten(today)
            } else {
                UpdateOutcome::Created(today)
            }
        }
    };

    match outcome {
        UpdateOutcome::Created(key) => tracing::info!("Balance inserted for {key}"),
        UpdateOutcome::Overwritten(key) => tracing::info!("Balance overwritten for {key}"),
        _ => {}
    }

    Ok(outcome)
}

fn log_record(key: &CalendarKey, record: &BalanceRecord) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => tracing::debug!("Writing the following balance for {key}:\n{json}"),
        Err(error) => tracing::debug!("Writing {record:?} for {key} (could not format: {error})"),
    }
}
