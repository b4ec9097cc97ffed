use crate::calendar;
use crate::codec;
use crate::errors::Result;
use crate::models::{check_day, ConsumptionEntry, Ledger};
use crate::storage::Backend;
use tracing::{info, warn};

/// Owns the ledger and its backing store. Every mutation is written through
/// before it becomes visible in memory, so a failed write changes nothing.
pub struct LedgerStore {
    backend: Box<dyn Backend>,
    key: String,
    ledger: Ledger,
}

impl LedgerStore {
    /// Loads the ledger stored under `key`. Unreadable or malformed data is
    /// logged and replaced by an empty ledger.
    pub fn open(backend: impl Backend + 'static, key: impl Into<String>) -> Self {
        let key = key.into();
        let ledger = match backend.read(&key) {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(ledger) => ledger,
                Err(err) => {
                    warn!(%key, "stored ledger is malformed, starting empty: {err}");
                    Ledger::new()
                }
            },
            Ok(None) => Ledger::new(),
            Err(err) => {
                warn!(%key, "failed to read stored ledger, starting empty: {err}");
                Ledger::new()
            }
        };
        info!(%key, days = ledger.len(), "ledger loaded");

        Self {
            backend: Box::new(backend),
            key,
            ledger,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn get_day(&self, date: &str) -> Option<&[ConsumptionEntry]> {
        self.ledger.day(date)
    }

    /// Replaces the day wholesale; an empty list deletes it.
    pub fn set_day(&mut self, date: &str, entries: Vec<ConsumptionEntry>) -> Result<()> {
        check_day(date, &entries)?;
        if entries.is_empty() {
            self.delete_day(date)?;
            return Ok(());
        }

        let mut next = self.ledger.clone();
        next.put(date.to_string(), entries);
        self.commit(next)
    }

    /// Returns whether the day existed.
    pub fn delete_day(&mut self, date: &str) -> Result<bool> {
        Ok(self.clear_range([date])? > 0)
    }

    /// Deletes every listed date with a single flush. Returns how many days
    /// were removed.
    pub fn clear_range<I, S>(&mut self, dates: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.ledger.clone();
        let mut removed = 0;
        for date in dates {
            if next.remove(date.as_ref()) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    pub fn clear_month(&mut self, year: i32, month_index: i64) -> Result<usize> {
        let dates = calendar::month_dates(year, month_index)?;
        self.clear_range(&dates)
    }

    pub fn export_all(&self) -> Ledger {
        self.ledger.clone()
    }

    pub fn export_document(&self) -> Result<String> {
        codec::encode(&self.ledger)
    }

    /// Overwrites the whole store with `ledger`.
    pub fn import_all(&mut self, ledger: Ledger) -> Result<()> {
        for (date, entries) in ledger.iter() {
            check_day(date, entries)?;
        }
        self.commit(ledger)
    }

    /// Decodes `text` and imports it; on any error the store is unchanged.
    pub fn import_document(&mut self, text: &str) -> Result<usize> {
        let ledger = codec::decode(text)?;
        let days = ledger.len();
        self.import_all(ledger)?;
        Ok(days)
    }

    fn commit(&mut self, next: Ledger) -> Result<()> {
        let payload = codec::encode(&next)?;
        self.backend.write(&self.key, &payload)?;
        self.ledger = next;
        Ok(())
    }
}
