//! In-memory log store for the collector service.
//!
//! Append-ordered ring buffer: unbounded growth is avoided by evicting the
//! oldest record once the configured capacity is reached. Queries filter by
//! exact service/level match, sort newest-first, and truncate to a limit.

use crate::record::LogRecord;
use std::collections::VecDeque;

/// Default number of records returned by a query when no limit is given.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Default ring buffer capacity.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Filter for log queries. Both filters are optional and combine as a
/// logical AND. Values are matched by exact string equality against the
/// record's wire names, so an unknown value simply matches nothing.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub service: Option<String>,
    pub level: Option<String>,
    pub limit: Option<usize>,
}

/// Result of a query: the (possibly truncated) records, the number of
/// records that matched before truncation, and whether the returned set
/// was narrowed relative to the full store (by filters or by the limit).
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub logs: Vec<LogRecord>,
    pub total: usize,
    pub filtered: bool,
}

pub struct LogStore {
    records: VecDeque<LogRecord>,
    capacity: usize,
}

impl LogStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one at capacity. Duplicates are
    /// permitted; there is no uniqueness constraint.
    pub fn append(&mut self, record: LogRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter, sort newest-first, and truncate.
    ///
    /// The sort is stable, so records with identical timestamps keep their
    /// insertion order relative to each other.
    pub fn query(&self, filter: &LogFilter) -> QueryOutcome {
        let mut matched: Vec<LogRecord> = self
            .records
            .iter()
            .filter(|record| {
                filter
                    .service
                    .as_deref()
                    .map_or(true, |s| record.service.as_str() == s)
                    && filter
                        .level
                        .as_deref()
                        .map_or(true, |l| record.level.as_str() == l)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.timestamp_millis().cmp(&a.timestamp_millis()));

        let total = matched.len();
        let limit = filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        matched.truncate(limit);

        QueryOutcome {
            filtered: matched.len() != self.records.len(),
            logs: matched,
            total,
        }
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
