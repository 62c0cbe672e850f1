//! Bounded in-memory history of classified readings.
//!
//! The store is the only shared mutable state in the service. A single
//! mutex guards the ring buffer; every operation is its own atomic unit and
//! snapshots are value copies taken under the lock.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::{ClassifiedRecord, Reading, Status};

// ---

/// Number of records retained by the service.
pub const HISTORY_CAPACITY: usize = 50;

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed-capacity FIFO of [`ClassifiedRecord`]s, oldest first.
#[derive(Debug)]
pub struct HistoryStore {
    records: Mutex<VecDeque<ClassifiedRecord>>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    // ---
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create a store holding at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        // ---
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn append(&self, record: ClassifiedRecord) {
        // ---
        let mut records = self.lock();
        Self::push_bounded(&mut records, self.capacity, record);
    }

    /// Stamp and append a new record in one critical section.
    ///
    /// The timestamp is taken from `clock` while the lock is held and is
    /// clamped to the newest stored timestamp, so the sequence stays
    /// non-decreasing even if the wall clock steps backwards.
    pub fn append_stamped(
        &self,
        status: Status,
        reading: Reading,
        clock: &dyn Clock,
    ) -> ClassifiedRecord {
        // ---
        let mut records = self.lock();

        let now = clock.now();
        let timestamp = match records.back() {
            Some(newest) if newest.timestamp > now => newest.timestamp,
            _ => now,
        };

        let record = ClassifiedRecord {
            timestamp,
            status,
            reading,
        };
        Self::push_bounded(&mut records, self.capacity, record.clone());
        record
    }

    /// Current contents, oldest to newest.
    pub fn snapshot(&self) -> Vec<ClassifiedRecord> {
        self.lock().iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    fn push_bounded(
        records: &mut VecDeque<ClassifiedRecord>,
        capacity: usize,
        record: ClassifiedRecord,
    ) {
        // ---
        while records.len() >= capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    // Every mutation leaves the buffer valid, so a poisoned lock is safe to reuse
    fn lock(&self) -> MutexGuard<'_, VecDeque<ClassifiedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
