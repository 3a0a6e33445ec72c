//! Turns raw user input into a [`Query`].
//!
//! Rules run in a fixed order and the first failure wins. Dates are local
//! calendar dates; time of day never enters the comparison.

use chrono::{Days, Local, NaiveDate};
use tracing::warn;

use crate::{
    error::ValidationError,
    model::{DateSelection, DayCount, Query},
};

/// Validate `location` and an optional date range against `today`.
pub fn build_query(
    location: &str,
    dates: Option<DateSelection>,
    today: NaiveDate,
) -> Result<Query, ValidationError> {
    let result = check(location, dates, today);
    if let Err(err) = &result {
        warn!(reason = err.reason(), "rejected lookup input");
    }
    result
}

/// [`build_query`] against the current local date.
pub fn build_query_today(
    location: &str,
    dates: Option<DateSelection>,
) -> Result<Query, ValidationError> {
    build_query(location, dates, Local::now().date_naive())
}

/// Earliest and latest dates a range may use, starting from `today`.
pub fn forecast_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let last = today.checked_add_days(Days::new(u64::from(DayCount::MAX))).unwrap_or(today);
    (today, last)
}

fn check(
    location: &str,
    dates: Option<DateSelection>,
    today: NaiveDate,
) -> Result<Query, ValidationError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ValidationError::MissingLocation);
    }

    let days = match dates {
        None => DayCount::DEFAULT,
        Some(selection) => day_span(selection, today)?,
    };

    Ok(Query { location: location.to_string(), days })
}

fn day_span(selection: DateSelection, today: NaiveDate) -> Result<DayCount, ValidationError> {
    let (Some(start), Some(end)) = (selection.start, selection.end) else {
        return Err(ValidationError::MissingDate);
    };

    if start < today || end < today {
        return Err(ValidationError::DateInPast);
    }
    if end < start {
        return Err(ValidationError::InvertedRange);
    }

    let span = (end - start).num_days() + 1;
    u8::try_from(span)
        .ok()
        .and_then(DayCount::new)
        .ok_or(ValidationError::RangeTooLong { days: span })
}
