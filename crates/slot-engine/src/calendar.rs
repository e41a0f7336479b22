//! Calendar-day arithmetic in the configured timezone.
//!
//! Every day boundary in the pipeline (weekend detection, working hours, the
//! per-day split) is computed here, in one IANA timezone, and converted back to
//! UTC instants.
//!
//! Local wall times that fall in a DST spring-forward gap do not exist; they are
//! shifted forward by one hour. Ambiguous wall times (fall-back) resolve to the
//! earlier of the two instants.

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;

use crate::interval::Interval;

/// Convert a local wall-clock time in `tz` to a UTC instant.
pub fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }
    let shifted = naive + Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// The local calendar date of `instant` in `tz`.
pub fn local_date(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// Local 00:00:00.000 of `date`.
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Local 23:59:59.999 of `date`.
pub fn end_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    resolve_local(
        tz,
        date.and_time(NaiveTime::MIN) + Duration::milliseconds(86_399_999),
    )
}

/// Local time `hours` after midnight of `date`, where `hours` is fractional
/// (`9.5` is 09:30). Sub-minute fractions are truncated.
pub fn at_hour(tz: &Tz, date: NaiveDate, hours: f64) -> DateTime<Utc> {
    let whole = hours.trunc();
    let minutes = ((hours - whole) * 60.0).trunc();
    let naive = date.and_time(NaiveTime::MIN)
        + Duration::hours(whole as i64)
        + Duration::minutes(minutes as i64);
    resolve_local(tz, naive)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// End of a window that starts at `start` and spans `days` local calendar days.
pub fn window_end(tz: &Tz, start: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    let local = start.with_timezone(tz).naive_local();
    let end = local
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDateTime::MAX);
    resolve_local(tz, end).max(start)
}

/// The local date holding the last instant of `interval`.
///
/// Ends are exclusive, so an interval ending exactly at local midnight belongs
/// to the day before. An empty interval belongs to the day of its start.
pub fn last_day(tz: &Tz, interval: &Interval) -> NaiveDate {
    if interval.is_empty() {
        return local_date(tz, interval.start());
    }
    local_date(tz, interval.end() - Duration::nanoseconds(1))
}

/// Every local date that the half-open `window` touches, in order.
pub fn days_touching(tz: &Tz, window: &Interval) -> Vec<NaiveDate> {
    if window.is_empty() {
        return Vec::new();
    }
    let first = local_date(tz, window.start());
    let last = last_day(tz, window);
    first.iter_days().take_while(|day| *day <= last).collect()
}
