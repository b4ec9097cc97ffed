use crate::calendar::{self, CalendarCell};
use crate::convert::{round_grams, round_kcal};
use crate::errors::Result;
use crate::models::{
    CellView, ConsumptionEntry, DaySummary, DayTotals, Ledger, MonthRef, MonthSummary,
    MonthTotals, MonthView,
};
use chrono::{Datelike, Local, NaiveDate};

pub fn day_totals(entries: &[ConsumptionEntry]) -> DayTotals {
    entries.iter().fold(DayTotals::default(), |totals, entry| DayTotals {
        alcohol_grams: totals.alcohol_grams + entry.alcohol_grams(),
        calories: totals.calories + entry.calories(),
    })
}

/// Sums every calendar day of the month; days without a record add zero.
pub fn month_totals(ledger: &Ledger, year: i32, month_index: i64) -> Result<MonthTotals> {
    let dates = calendar::month_dates(year, month_index)?;
    let mut totals = MonthTotals {
        days_in_month: dates.len() as u32,
        ..MonthTotals::default()
    };

    for date in &dates {
        let entries = ledger.day(date).unwrap_or_default();
        if !entries.is_empty() {
            totals.days_with_entries += 1;
        }
        let day = day_totals(entries);
        totals.alcohol_grams += day.alcohol_grams;
        totals.calories += day.calories;
    }

    Ok(totals)
}

impl MonthTotals {
    pub fn average_per_calendar_day(&self) -> f64 {
        if self.days_in_month == 0 {
            return 0.0;
        }
        self.calories / f64::from(self.days_in_month)
    }

    pub fn average_per_drinking_day(&self) -> f64 {
        if self.days_with_entries == 0 {
            return 0.0;
        }
        self.calories / f64::from(self.days_with_entries)
    }

    pub fn summary(&self) -> MonthSummary {
        MonthSummary {
            alcohol_grams: round_grams(self.alcohol_grams),
            calories: round_kcal(self.calories),
            days_with_entries: self.days_with_entries,
            days_in_month: self.days_in_month,
            average_per_calendar_day: round_kcal(self.average_per_calendar_day()),
            average_per_drinking_day: round_kcal(self.average_per_drinking_day()),
        }
    }
}

impl DayTotals {
    pub fn summary(&self) -> DaySummary {
        DaySummary {
            alcohol_grams: round_grams(self.alcohol_grams),
            calories: round_kcal(self.calories),
        }
    }
}

pub fn current_month() -> MonthRef {
    month_of(Local::now().date_naive())
}

pub fn month_of(date: NaiveDate) -> MonthRef {
    MonthRef {
        year: date.year(),
        month_index: date.month0(),
    }
}

/// Grid plus statistics for one month, ready for a client to render.
pub fn month_view(ledger: &Ledger, year: i32, month_index: i64) -> Result<MonthView> {
    month_view_at(ledger, year, month_index, Local::now().date_naive())
}

pub fn month_view_at(
    ledger: &Ledger,
    year: i32,
    month_index: i64,
    today: NaiveDate,
) -> Result<MonthView> {
    let today_key = calendar::iso_date(today);
    let layout = calendar::layout(year, month_index)?;
    let month = layout.month;
    let (year, month_index) = (month.year, i64::from(month.month_index));

    let cells = layout
        .cells
        .into_iter()
        .map(|cell| {
            let summary = match &cell {
                CalendarCell::InMonth { date, .. } => ledger
                    .day(date)
                    .map(|entries| day_totals(entries).summary()),
                CalendarCell::Outside { .. } => None,
            };
            let today = cell.date() == Some(today_key.as_str());
            CellView {
                cell,
                summary,
                today,
            }
        })
        .collect();

    Ok(MonthView {
        label: format!("{:04}-{:02}", year, month.month_index + 1),
        year,
        month_index: month.month_index,
        prev: calendar::shift_month(year, month_index, -1)?,
        next: calendar::shift_month(year, month_index, 1)?,
        cells,
        stats: month_totals(ledger, year, month_index)?.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn ledger(days: &[(&str, Vec<ConsumptionEntry>)]) -> Ledger {
        let days: BTreeMap<_, _> = days
            .iter()
            .map(|(date, entries)| (date.to_string(), entries.clone()))
            .collect();
        Ledger::from_days(days).unwrap()
    }

    #[test]
    fn day_totals_sum_both_entry_models() {
        let totals = day_totals(&[
            ConsumptionEntry::beverage("vodka", 50.0),
            ConsumptionEntry::grams(10.0),
        ]);
        assert!(close(totals.alcohol_grams, 25.78));
        assert!(close(totals.calories, 185.5));
        assert_eq!(day_totals(&[]), DayTotals::default());
    }

    #[test]
    fn empty_month_has_zero_totals() {
        let totals = month_totals(&Ledger::new(), 2024, 1).unwrap();
        assert_eq!(totals.alcohol_grams, 0.0);
        assert_eq!(totals.calories, 0.0);
        assert_eq!(totals.days_with_entries, 0);
        assert_eq!(totals.days_in_month, 29);
        assert_eq!(totals.average_per_drinking_day(), 0.0);
        assert_eq!(totals.average_per_calendar_day(), 0.0);
    }

    #[test]
    fn month_totals_ignore_other_months() {
        let ledger = ledger(&[
            ("2024-01-31", vec![ConsumptionEntry::grams(100.0)]),
            ("2024-02-01", vec![ConsumptionEntry::grams(10.0)]),
            ("2024-02-29", vec![ConsumptionEntry::beverage("beer", 500.0)]),
            ("2024-03-01", vec![ConsumptionEntry::grams(100.0)]),
        ]);
        let totals = month_totals(&ledger, 2024, 1).unwrap();
        assert_eq!(totals.days_with_entries, 2);
        assert!(close(totals.alcohol_grams, 10.0 + 19.725));
        assert!(close(totals.calories, 70.0 + 215.0));
        assert!(close(totals.average_per_drinking_day(), 142.5));
        assert!(close(totals.average_per_calendar_day(), 285.0 / 29.0));
    }

    #[test]
    fn rounding_happens_after_summation() {
        let entries: Vec<_> = (0..3).map(|_| ConsumptionEntry::grams(0.04)).collect();
        let ledger = ledger(&[("2024-06-10", entries)]);
        let summary = month_totals(&ledger, 2024, 5).unwrap().summary();
        assert_eq!(summary.alcohol_grams, 0.1);
        assert_eq!(summary.calories, 1);
    }

    #[test]
    fn month_view_decorates_recorded_days() {
        let ledger = ledger(&[("2024-01-15", vec![ConsumptionEntry::beverage("vodka", 50.0)])]);
        let view = month_view(&ledger, 2024, 0).unwrap();
        assert_eq!(view.label, "2024-01");
        assert_eq!(view.prev, MonthRef { year: 2023, month_index: 11 });
        assert_eq!(view.next, MonthRef { year: 2024, month_index: 1 });
        assert_eq!(view.cells.len(), 35);

        let decorated: Vec<_> = view
            .cells
            .iter()
            .filter_map(|cell| cell.summary.map(|summary| (cell.cell.date(), summary)))
            .collect();
        assert_eq!(
            decorated,
            vec![(
                Some("2024-01-15"),
                DaySummary {
                    alcohol_grams: 15.8,
                    calories: 116
                }
            )]
        );
        assert_eq!(view.stats.days_with_entries, 1);
        assert_eq!(view.stats.average_per_drinking_day, 116);
        assert_eq!(view.stats.average_per_calendar_day, 4);
    }

    #[test]
    fn month_view_flags_only_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let view = month_view_at(&Ledger::new(), 2024, 0, today).unwrap();
        let flagged: Vec<_> = view
            .cells
            .iter()
            .filter(|cell| cell.today)
            .map(|cell| cell.cell.date())
            .collect();
        assert_eq!(flagged, vec![Some("2024-01-15")]);

        let view = month_view_at(&Ledger::new(), 2024, 1, today).unwrap();
        assert!(view.cells.iter().all(|cell| !cell.today));

        let json = serde_json::to_value(&view.cells[0]).unwrap();
        assert_eq!(json["today"], false);
    }

    #[test]
    fn month_view_normalizes_month_index() {
        let view = month_view(&Ledger::new(), 2024, 12).unwrap();
        assert_eq!((view.year, view.month_index), (2025, 0));
        assert_eq!(view.label, "2025-01");
    }

    #[test]
    fn month_of_uses_zero_based_index() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(month_of(date), MonthRef { year: 2026, month_index: 0 });
    }
}
