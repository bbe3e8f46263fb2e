use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::{Pack, Rarity};
use crate::hashing::fingerprint;
use crate::report::Violation;

/// Default ring capacity of the audit log.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Compact description of the pack a log entry refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSummary {
    /// Pack identifier
    pub pack_id: String,
    /// Canonical content fingerprint
    pub fingerprint: String,
    /// Number of cards in the pack
    pub card_count: usize,
    /// Highest rarity present
    pub best_rarity: Option<Rarity>,
}

impl PackSummary {
    pub fn of(pack: &Pack) -> Self {
        Self {
            pack_id: pack.id.clone(),
            fingerprint: fingerprint(pack),
            card_count: pack.cards.len(),
            best_rarity: pack.best_rarity(),
        }
    }
}

/// One flagged validation run, as recorded by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousActivityLogEntry {
    /// The pack the run concerned
    pub pack_summary: PackSummary,
    /// Violations the run produced (empty for clean-but-notable runs)
    pub violations: Vec<Violation>,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}

/// Bounded in-memory log of flagged validation runs. On overflow the
/// oldest entry is evicted; the newest append is never dropped.
#[derive(Debug)]
pub struct AuditLog {
    entries: VecDeque<SuspiciousActivityLogEntry>,
    capacity: usize,
}

impl AuditLog {
    /// Log with the default capacity of 1000 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest when the ring is full.
    pub fn log(&mut self, entry: SuspiciousActivityLogEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The `limit` most recent entries, newest first. Returns fewer only
    /// when the log holds fewer.
    pub fn recent(&self, limit: usize) -> Vec<SuspiciousActivityLogEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Empties the log. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
