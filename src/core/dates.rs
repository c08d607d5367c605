//! Calendar helpers shared by the engine and the CLI previews.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Parse a `YYYY-MM-DD` date; anything else is no date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Serde adapter: blank, malformed or non-string dates become `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// Length of a holding (or residence) period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct HoldingPeriod {
    /// Whole years, counted like birthdays
    pub years: i32,
    /// Total elapsed days
    pub days: i64,
}

impl std::fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}y {}d", self.years, self.days % 365)
    }
}

/// Period from `start` to `end`.
///
/// Years are the calendar-year difference, less one when `end`'s month/day
/// falls before `start`'s. Missing dates give a zero period.
pub fn period_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> HoldingPeriod {
    let (Some(start), Some(end)) = (start, end) else {
        return HoldingPeriod::default();
    };

    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }

    HoldingPeriod {
        years: years.max(0),
        days: (end - start).num_days().max(0),
    }
}

/// Preliminary return deadline for a disposal.
///
/// The last day of the second month after the disposal month, moved forward
/// past weekends and Labour Day (May 1).
pub fn statutory_deadline(disposal: NaiveDate) -> Option<NaiveDate> {
    let month_start = disposal.with_day(1)?;
    let mut deadline = month_start.checked_add_months(Months::new(3))?.pred_opt()?;

    while !is_filing_day(deadline) {
        deadline = deadline.succ_opt()?;
    }
    Some(deadline)
}

/// Add calendar months, clamping the day to the end of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

fn is_filing_day(date: NaiveDate) -> bool {
    let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    let labour_day = date.month() == 5 && date.day() == 1;
    !weekend && !labour_day
}
