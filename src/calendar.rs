//! Month grid arithmetic for a Monday-first, seven-column calendar.
//!
//! Month indices are 0-based (0 = January) and may fall outside `0..12`;
//! every entry point normalizes them through [`month_start`], so navigating
//! past December or before January rolls the year over without special cases.

use crate::errors::{LedgerError, Result};
use crate::models::MonthRef;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarCell {
    /// Padding from an adjacent month; the day number is display-only.
    Outside { day: u32 },
    InMonth { day: u32, date: String },
}

impl CalendarCell {
    pub fn date(&self) -> Option<&str> {
        match self {
            Self::InMonth { date, .. } => Some(date),
            Self::Outside { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    pub month: MonthRef,
    pub leading: u32,
    pub days_in_month: u32,
    pub cells: Vec<CalendarCell>,
}

/// First day of the month `month_index` months after January of `year`.
pub fn month_start(year: i32, month_index: i64) -> Result<NaiveDate> {
    let out_of_range = || LedgerError::DateOutOfRange { year, month_index };
    let total = i64::from(year)
        .checked_mul(12)
        .and_then(|months| months.checked_add(month_index))
        .ok_or_else(out_of_range)?;
    let normalized_year = i32::try_from(total.div_euclid(12)).map_err(|_| out_of_range())?;
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(normalized_year, month0 + 1, 1).ok_or_else(out_of_range)
}

pub fn shift_month(year: i32, month_index: i64, delta: i64) -> Result<MonthRef> {
    let start = month_start(year, month_index.saturating_add(delta))?;
    Ok(MonthRef {
        year: start.year(),
        month_index: start.month0(),
    })
}

pub fn normalize(year: i32, month_index: i64) -> Result<MonthRef> {
    shift_month(year, month_index, 0)
}

/// Day count of a month: "day 0" of the following month is its last day.
pub fn days_in_month(year: i32, month_index: i64) -> Result<u32> {
    let next = month_start(year, month_index.saturating_add(1))?;
    next.pred_opt()
        .map(|last| last.day())
        .ok_or(LedgerError::DateOutOfRange { year, month_index })
}

/// Weekday of `date` with Monday = 0 .. Sunday = 6.
pub fn monday_first_weekday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a zero-padded `YYYY-MM-DD` key; anything else is rejected.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let invalid = || LedgerError::InvalidDate(value.to_string());
    if value.len() != 10 {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    if iso_date(date) != value {
        return Err(invalid());
    }
    Ok(date)
}

pub fn month_dates(year: i32, month_index: i64) -> Result<Vec<String>> {
    let start = month_start(year, month_index)?;
    let count = days_in_month(year, month_index)?;
    Ok(start
        .iter_days()
        .take(count as usize)
        .map(iso_date)
        .collect())
}

pub fn layout(year: i32, month_index: i64) -> Result<MonthLayout> {
    let start = month_start(year, month_index)?;
    let days = days_in_month(year, month_index)?;
    let leading = monday_first_weekday(start);
    let total = (leading + days).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(total as usize);
    if leading > 0 {
        let prev_last = start
            .pred_opt()
            .map(|date| date.day())
            .ok_or(LedgerError::DateOutOfRange { year, month_index })?;
        for offset in 0..leading {
            cells.push(CalendarCell::Outside {
                day: prev_last - leading + 1 + offset,
            });
        }
    }
    for (offset, date) in start.iter_days().take(days as usize).enumerate() {
        cells.push(CalendarCell::InMonth {
            day: offset as u32 + 1,
            date: iso_date(date),
        });
    }
    for day in 1..=(total - leading - days) {
        cells.push(CalendarCell::Outside { day });
    }

    Ok(MonthLayout {
        month: MonthRef {
            year: start.year(),
            month_index: start.month0(),
        },
        leading,
        days_in_month: days,
        cells,
    })
}
