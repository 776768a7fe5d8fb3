//! Committed score history and its persistence seam.
//!
//! Scores are only recorded when the player explicitly commits one. The
//! history is newest-first, records are frozen once written, and the only way
//! to remove them is clearing the whole collection. Persistence is
//! best-effort: a failed save is logged and otherwise ignored, the in-memory
//! history stays authoritative.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::result::{AutoResult, GatorResult, RangeBracket};

/// Frozen snapshot of one committed [`GatorResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub tn: i32,
    pub auto: AutoResult,
    pub bracket: RangeBracket,
    pub notes: Vec<String>,
}

impl ScoreRecord {
    #[must_use]
    pub fn from_result(result: &GatorResult, timestamp_ms: u64) -> Self {
        Self {
            id: timestamp_ms.to_string(),
            timestamp: timestamp_ms,
            tn: result.total_tn,
            auto: result.auto_result,
            bracket: result.bracket(),
            notes: result.notes.clone(),
        }
    }
}

/// Newest-first list of committed scores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory(Vec<ScoreRecord>);

impl ScoreHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap records already ordered newest-first.
    #[must_use]
    pub const fn from_records(records: Vec<ScoreRecord>) -> Self {
        Self(records)
    }

    /// Record a score as the newest entry.
    pub fn commit(&mut self, record: ScoreRecord) -> &ScoreRecord {
        self.0.insert(0, record);
        &self.0[0]
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn latest(&self) -> Option<&ScoreRecord> {
        self.0.first()
    }

    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScoreHistory {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize records in the stored JSON array format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_history(records: &[ScoreRecord]) -> Result<String, HistoryError> {
    Ok(serde_json::to_string(records)?)
}

/// Parse the stored JSON array format.
///
/// # Errors
///
/// Returns an error if the payload is not a valid record array.
pub fn decode_history(raw: &str) -> Result<Vec<ScoreRecord>, HistoryError> {
    Ok(serde_json::from_str(raw)?)
}

/// Trait for abstracting where history is kept.
/// Platform-specific implementations should provide this
pub trait HistoryStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every stored record, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read or parsed.
    fn load(&self) -> Result<Vec<ScoreRecord>, Self::Error>;

    /// Replace the stored history with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    fn save(&self, records: &[ScoreRecord]) -> Result<(), Self::Error>;
}

/// In-process storage, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStorage {
    records: Rc<RefCell<Vec<ScoreRecord>>>,
}

impl MemoryHistoryStorage {
    #[must_use]
    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: Rc::new(RefCell::new(records)),
        }
    }

    /// Copy of what is currently persisted.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ScoreRecord> {
        self.records.borrow().clone()
    }
}

impl HistoryStorage for MemoryHistoryStorage {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<ScoreRecord>, Self::Error> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[ScoreRecord]) -> Result<(), Self::Error> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

/// A score history bound to the storage it persists through.
#[derive(Debug)]
pub struct HistoryBook<S>
where
    S: HistoryStorage,
{
    storage: S,
    history: ScoreHistory,
}

impl<S> HistoryBook<S>
where
    S: HistoryStorage,
{
    /// Load the stored history; unreadable storage starts an empty one.
    pub fn open(storage: S) -> Self {
        let history = match storage.load() {
            Ok(records) => ScoreHistory::from_records(records),
            Err(err) => {
                log::warn!("Score history unavailable, starting empty: {err}");
                ScoreHistory::new()
            }
        };
        Self { storage, history }
    }

    #[must_use]
    pub const fn history(&self) -> &ScoreHistory {
        &self.history
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Freeze `result` as the newest record and persist the history.
    pub fn commit(&mut self, result: &GatorResult, timestamp_ms: u64) -> &ScoreRecord {
        let record = ScoreRecord::from_result(result, timestamp_ms);
        log::debug!(
            "Committing score {} (TN {}, {})",
            record.id,
            record.tn,
            record.auto
        );
        self.history.commit(record);
        self.persist();
        &self.history.records()[0]
    }

    /// Drop every record and persist the empty history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// Write the current history, reporting failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns the storage error unchanged.
    pub fn try_persist(&self) -> Result<(), S::Error> {
        self.storage.save(self.history.records())
    }

    fn persist(&self) {
        if let Err(err) = self.try_persist() {
            log::warn!("Failed to persist score history: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GatorInputs;

    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded")]
    struct QuotaExceeded;

    #[derive(Debug, Default)]
    struct FullStorage;

    impl HistoryStorage for FullStorage {
        type Error = QuotaExceeded;

        fn load(&self) -> Result<Vec<ScoreRecord>, Self::Error> {
            Err(QuotaExceeded)
        }

        fn save(&self, _records: &[ScoreRecord]) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }
    }

    #[test]
    fn record_freezes_result_summary() {
        let result = GatorInputs::default().compute();
        let record = ScoreRecord::from_result(&result, 1_700_000_000_000);
        assert_eq!(record.id, "1700000000000");
        assert_eq!(record.tn, 6);
        assert_eq!(record.auto, AutoResult::None);
        assert_eq!(record.bracket, RangeBracket::Medium);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn commits_are_newest_first_and_persisted() {
        let storage = MemoryHistoryStorage::default();
        let mut book = HistoryBook::open(storage.clone());
        assert!(book.history().is_empty());

        let mut inputs = GatorInputs::default();
        book.commit(&inputs.compute(), 1);
        inputs.context.range_hexes = 2;
        let latest = book.commit(&inputs.compute(), 2).clone();

        assert_eq!(latest.id, "2");
        assert_eq!(book.history().len(), 2);
        assert_eq!(book.history().latest(), Some(&latest));
        let ids: Vec<_> = storage.snapshot().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn reopening_restores_history() {
        let storage = MemoryHistoryStorage::default();
        {
            let mut book = HistoryBook::open(storage.clone());
            book.commit(&GatorInputs::default().compute(), 42);
        }
        let book = HistoryBook::open(storage);
        assert_eq!(book.history().len(), 1);
        assert_eq!(book.history().records()[0].timestamp, 42);
    }

    #[test]
    fn clear_empties_storage() {
        let storage = MemoryHistoryStorage::default();
        let mut book = HistoryBook::open(storage.clone());
        book.commit(&GatorInputs::default().compute(), 7);
        book.clear();
        assert!(book.history().is_empty());
        assert!(storage.snapshot().is_empty());
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let mut book = HistoryBook::open(FullStorage);
        assert!(book.history().is_empty());
        let record = book.commit(&GatorInputs::default().compute(), 9).clone();
        assert_eq!(record.tn, 6);
        assert_eq!(book.history().len(), 1);
        assert!(book.try_persist().is_err());
        book.clear();
        assert!(book.history().is_empty());
    }

    #[test]
    fn decodes_records_written_by_the_browser_form() {
        let raw = r#"[
            {"id":"1718000000000","timestamp":1718000000000,"tn":13,"auto":"auto_miss",
             "bracket":"long","notes":["Heat penalty: +4","Automatic miss (TN > 12)"]},
            {"id":"1717000000000","timestamp":1717000000000,"tn":6,"auto":"none",
             "bracket":"medium","notes":[]}
        ]"#;
        let records = decode_history(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].auto, AutoResult::AutoMiss);
        assert_eq!(records[0].bracket, RangeBracket::Long);
        let encoded = encode_history(&records).unwrap();
        assert!(encoded.contains("\"auto\":\"auto_miss\""));
        assert_eq!(decode_history(&encoded).unwrap(), records);
    }

    #[test]
    fn rejects_garbage_payloads() {
        assert!(decode_history("not json").is_err());
        assert!(decode_history(r#"[{"id":"1"}]"#).is_err());
    }
}
