use crate::calendar::{self, CalendarCell};
use crate::catalog;
use crate::convert;
use crate::errors::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded drink. The two shapes mirror the two ways a drink can be
/// entered: grams of ethanol typed in directly, or a catalog kind plus volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsumptionEntry {
    Beverage {
        #[serde(rename = "typeId", alias = "beverageKindId")]
        type_id: String,
        #[serde(rename = "volumeMl")]
        volume_ml: f64,
    },
    Grams {
        #[serde(alias = "gramsOfAlcohol")]
        grams: f64,
    },
}

impl ConsumptionEntry {
    pub fn beverage(type_id: impl Into<String>, volume_ml: f64) -> Self {
        Self::Beverage {
            type_id: type_id.into(),
            volume_ml,
        }
    }

    pub fn grams(grams: f64) -> Self {
        Self::Grams { grams }
    }

    pub fn check(&self) -> std::result::Result<(), &'static str> {
        match self {
            Self::Beverage { type_id, volume_ml } => {
                if type_id.trim().is_empty() {
                    return Err("beverage kind is missing");
                }
                if !volume_ml.is_finite() || *volume_ml <= 0.0 {
                    return Err("volume must be a positive number");
                }
            }
            Self::Grams { grams } => {
                if !grams.is_finite() || *grams <= 0.0 {
                    return Err("grams must be a positive number");
                }
            }
        }
        Ok(())
    }

    pub fn alcohol_grams(&self) -> f64 {
        match self {
            Self::Beverage { type_id, volume_ml } => {
                convert::ethanol_grams(*volume_ml, catalog::lookup(type_id).abv_percent)
            }
            Self::Grams { grams } => *grams,
        }
    }

    pub fn calories(&self) -> f64 {
        match self {
            Self::Beverage { type_id, volume_ml } => {
                convert::calories(*volume_ml, catalog::lookup(type_id).kcal_per_100ml)
            }
            Self::Grams { grams } => convert::calories_from_grams_alcohol(*grams),
        }
    }
}

/// Validates one day's key and entries against the ledger invariants.
pub fn check_day(date: &str, entries: &[ConsumptionEntry]) -> Result<()> {
    calendar::parse_iso_date(date)?;
    for entry in entries {
        entry
            .check()
            .map_err(|reason| LedgerError::invalid_entry(date, reason))?;
    }
    Ok(())
}

/// Date-keyed consumption records. Days without entries are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    days: BTreeMap<String, Vec<ConsumptionEntry>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from raw days, validating every key and entry.
    /// Empty days are dropped.
    pub fn from_days(days: BTreeMap<String, Vec<ConsumptionEntry>>) -> Result<Self> {
        let mut ledger = Self::new();
        for (date, entries) in days {
            check_day(&date, &entries)?;
            ledger.put(date, entries);
        }
        Ok(ledger)
    }

    pub fn day(&self, date: &str) -> Option<&[ConsumptionEntry]> {
        self.days.get(date).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ConsumptionEntry])> {
        self.days
            .iter()
            .map(|(date, entries)| (date.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &BTreeMap<String, Vec<ConsumptionEntry>> {
        &self.days
    }

    pub(crate) fn put(&mut self, date: String, entries: Vec<ConsumptionEntry>) {
        if entries.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, entries);
        }
    }

    pub(crate) fn remove(&mut self, date: &str) -> bool {
        self.days.remove(date).is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub alcohol_grams: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub alcohol_grams: f64,
    pub calories: f64,
    pub days_with_entries: u32,
    pub days_in_month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub alcohol_grams: f64,
    pub calories: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub alcohol_grams: f64,
    pub calories: i64,
    pub days_with_entries: u32,
    pub days_in_month: u32,
    pub average_per_calendar_day: i64,
    pub average_per_drinking_day: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRef {
    pub year: i32,
    pub month_index: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    #[serde(flatten)]
    pub cell: CalendarCell,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DaySummary>,
    pub today: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub label: String,
    pub year: i32,
    pub month_index: u32,
    pub prev: MonthRef,
    pub next: MonthRef,
    pub cells: Vec<CellView>,
    pub stats: MonthSummary,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

/// Raw row as typed by the user. Rows that do not describe a valid drink are
/// dropped before the day is committed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[serde(alias = "beverageKindId")]
    pub type_id: Option<String>,
    pub volume_ml: Option<f64>,
    pub grams: Option<f64>,
}

impl EntryInput {
    pub fn into_entry(self) -> Option<ConsumptionEntry> {
        let entry = match (self.type_id, self.volume_ml, self.grams) {
            (Some(type_id), Some(volume_ml), _) => ConsumptionEntry::beverage(type_id, volume_ml),
            (None, None, Some(grams)) => ConsumptionEntry::grams(grams),
            _ => return None,
        };
        entry.check().ok().map(|()| entry)
    }
}

#[derive(Debug, Deserialize)]
pub struct CommitDayRequest {
    pub entries: Vec<EntryInput>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub date: String,
    pub entries: Vec<ConsumptionEntry>,
    pub summary: DaySummary,
    pub dropped: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub abv_percent: f64,
    pub volume_ml: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub grams: f64,
    pub kcal: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub days: usize,
}
