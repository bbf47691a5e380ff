use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::AppError;

/// Length of a planning week.
pub const WEEK_DAYS: u64 = 7;

/// The Monday on or before `date`.
///
/// Fails for dates whose week would start before the earliest date chrono
/// can represent.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate, AppError> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .ok_or_else(|| out_of_range(date))
}

/// First day after the week that starts on `start`.
pub fn week_end_exclusive(start: NaiveDate) -> Result<NaiveDate, AppError> {
    start
        .checked_add_days(Days::new(WEEK_DAYS))
        .ok_or_else(|| out_of_range(start))
}

/// Start and exclusive end of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = week_start(date)?;
    Ok((start, week_end_exclusive(start)?))
}

fn out_of_range(date: NaiveDate) -> AppError {
    AppError::BadRequest(format!("Date {} is outside the supported range", date))
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}
