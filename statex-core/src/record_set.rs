//! In-memory collection of records built during one pipeline run

use serde::Serialize;
use std::ops::Deref;

use crate::record::TransactionRecord;

/// Append-only while the parser fills it, read-only afterwards.
///
/// There is no way to remove or mutate a stored record; consumers only
/// ever see a `&[TransactionRecord]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransactionRecordSet {
    records: Vec<TransactionRecord>,
}

impl TransactionRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }
}

impl Deref for TransactionRecordSet {
    type Target = [TransactionRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a TransactionRecordSet {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
