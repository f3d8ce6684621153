//! Append-only, newest-first record of confirmed state-changing calls.
//! Entries are never mutated or removed; the ledger lives for the session.

use crate::domain::TransactionRecord;

#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    records: Vec<TransactionRecord>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `entry`; existing entries keep their relative order.
    pub fn record(&mut self, entry: TransactionRecord) {
        self.records.insert(0, entry);
    }

    /// Full history, newest first.
    pub fn all(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
