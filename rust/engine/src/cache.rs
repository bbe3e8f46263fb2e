use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::cards::Pack;
use crate::hashing::fingerprint;
use crate::report::{Severity, ValidationResult, Violation, ViolationKind};

/// First-sight record for one pack fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCacheEntry {
    /// Canonical content fingerprint
    pub fingerprint: String,
    /// When this content was first submitted
    pub first_seen_at: DateTime<Utc>,
    /// When the entry stops counting as a duplicate
    pub expires_at: DateTime<Utc>,
}

/// TTL-bound map from pack fingerprint to first-seen time. Rejects
/// resubmission of identical content inside the window.
///
/// Entries expire lazily: expiry is checked at lookup and an expired entry
/// is simply overwritten, there is no background sweep. The key is the
/// content hash alone, so two users independently drawing an identical
/// multiset inside the window collide as an accepted false positive.
#[derive(Debug)]
pub struct DuplicateCache {
    entries: HashMap<String, DuplicateCacheEntry>,
    ttl: Duration,
}

impl DuplicateCache {
    /// Cache with the default one-hour window.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(1))
    }

    /// Cache with a caller-chosen window.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Checks a pack against the cache and records it, using the current
    /// wall clock.
    pub fn check_and_record(&mut self, pack: &Pack) -> ValidationResult {
        self.check_and_record_at(pack, Utc::now())
    }

    /// Clock-injectable variant of [`check_and_record`](Self::check_and_record);
    /// callers with their own time source (and tests) pass `now` explicitly.
    pub fn check_and_record_at(&mut self, pack: &Pack, now: DateTime<Utc>) -> ValidationResult {
        let fp = fingerprint(pack);
        if let Some(entry) = self.entries.get(&fp) {
            if now < entry.expires_at {
                tracing::warn!(
                    fingerprint = %fp,
                    pack_id = %pack.id,
                    "duplicate pack submission inside ttl window"
                );
                return ValidationResult::fail(vec![Violation::new(
                    ViolationKind::DuplicatePackDetected,
                    Severity::Critical,
                    format!(
                        "pack content {} was already accepted at {}",
                        fp, entry.first_seen_at
                    ),
                    json!({
                        "fingerprint": fp,
                        "firstSeenAt": entry.first_seen_at.to_rfc3339(),
                        "expiresAt": entry.expires_at.to_rfc3339(),
                    }),
                )]);
            }
        }
        self.entries.insert(
            fp.clone(),
            DuplicateCacheEntry {
                fingerprint: fp,
                first_seen_at: now,
                expires_at: now + self.ttl,
            },
        );
        ValidationResult::pass()
    }

    /// Number of recorded fingerprints, expired entries included (lazy
    /// eviction never removes them on its own).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every recorded fingerprint.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DuplicateCache {
    fn default() -> Self {
        Self::new()
    }
}
