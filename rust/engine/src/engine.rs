use chrono::{Duration, Utc};
use serde_json::json;

use crate::anomaly;
use crate::audit::{AuditLog, PackSummary, SuspiciousActivityLogEntry};
use crate::cache::DuplicateCache;
use crate::cards::{Pack, PackConfiguration, Rarity};
use crate::distribution;
use crate::report::{Severity, ValidationResult, Violation, ViolationKind};
use crate::uniqueness;

/// Switches and tunables for one validation pipeline.
/// Each of the four checks toggles independently; all are on by default.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Run the duplicate-cache check
    pub check_duplicates: bool,
    /// Run the per-slot rarity distribution check
    pub check_distribution: bool,
    /// Run the population anomaly check
    pub check_anomaly: bool,
    /// Run the in-pack identity entropy check
    pub check_entropy: bool,
    /// z-score above which the anomaly detector raises a violation
    pub anomaly_threshold: f64,
    /// Fraction of maximum identity entropy below which a warning is raised
    pub min_entropy_fraction: f64,
    /// Clean runs pulling at or above this rarity are still audit-logged
    pub notable_rarity: Rarity,
    /// Duplicate-cache window, applied when the engine is constructed
    pub duplicate_ttl: Duration,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_duplicates: true,
            check_distribution: true,
            check_anomaly: true,
            check_entropy: true,
            anomaly_threshold: 3.0,
            min_entropy_fraction: uniqueness::DEFAULT_MIN_ENTROPY_FRACTION,
            notable_rarity: Rarity::Legendary,
            duplicate_ttl: Duration::hours(1),
        }
    }
}

impl ValidationOptions {
    /// Every check disabled. Structural pre-checks still run.
    pub fn none() -> Self {
        Self {
            check_duplicates: false,
            check_distribution: false,
            check_anomaly: false,
            check_entropy: false,
            ..Self::default()
        }
    }
}

/// Validation pipeline over the four checks, plus the process-scoped state
/// they need: the duplicate cache and the audit log.
///
/// Explicitly constructed and lifetime-scoped: every engine instance owns
/// independent state, so tests and callers never share a hidden global.
/// Callers that validate from several threads wrap the engine in their own
/// lock; the same-fingerprint first-submission race is accepted.
#[derive(Debug)]
pub struct ValidationEngine {
    options: ValidationOptions,
    cache: DuplicateCache,
    audit: AuditLog,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::with_options(ValidationOptions::default())
    }

    pub fn with_options(options: ValidationOptions) -> Self {
        Self {
            cache: DuplicateCache::with_ttl(options.duplicate_ttl),
            audit: AuditLog::new(),
            options,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Replaces the check toggles and tunables for subsequent runs.
    /// `duplicate_ttl` only applies at construction; the live cache keeps
    /// its window.
    pub fn set_options(&mut self, options: ValidationOptions) {
        self.options = options;
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_log_mut(&mut self) -> &mut AuditLog {
        &mut self.audit
    }

    pub fn cache(&self) -> &DuplicateCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut DuplicateCache {
        &mut self.cache
    }

    /// Runs the enabled checks over a pack and merges their results into
    /// one verdict.
    ///
    /// Structural pre-checks run regardless of the toggles: a pack with no
    /// cards, or fewer cards than the configuration produces, fails
    /// immediately; a card whose holo flag contradicts its holo type adds a
    /// high-severity consistency violation. Confidence is 0 when no check
    /// ran or any violation stands, 1.0 for a fully clean run, and
    /// discounted per warning (floor 0.5) in between. Non-clean runs, and
    /// clean runs whose best rarity reaches `notable_rarity`, append an
    /// entry to the audit log.
    pub fn validate(
        &mut self,
        pack: &Pack,
        config: &PackConfiguration,
        historical_scores: &[f64],
    ) -> ValidationResult {
        // degenerate input fails before any check gets a say
        let structural = if pack.cards.is_empty() {
            Some(format!("pack {} contains no cards", pack.id))
        } else if pack.cards.len() < config.cards_per_pack {
            Some(format!(
                "pack {} holds {} cards, fewer than the {} a {} pack produces",
                pack.id,
                pack.cards.len(),
                config.cards_per_pack,
                config.pack_type
            ))
        } else {
            None
        };
        if let Some(message) = structural {
            let result = ValidationResult::fail(vec![Violation::new(
                ViolationKind::MalformedPack,
                Severity::Critical,
                message,
                json!({
                    "packId": pack.id,
                    "cardCount": pack.cards.len(),
                    "cardsPerPack": config.cards_per_pack,
                }),
            )]);
            self.record(pack, &result);
            return result;
        }

        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        for card in &pack.cards {
            if !card.holo_consistent() {
                violations.push(Violation::new(
                    ViolationKind::HoloMismatch,
                    Severity::High,
                    format!(
                        "card {} holo flag {} contradicts holo type {}",
                        card.id,
                        card.is_holo,
                        card.holo_type.as_str()
                    ),
                    json!({
                        "cardId": card.id,
                        "isHolo": card.is_holo,
                        "holoType": card.holo_type.as_str(),
                    }),
                ));
            }
        }

        let opts = self.options.clone();
        let mut checks_run = 0usize;
        if opts.check_duplicates {
            let r = self.cache.check_and_record(pack);
            violations.extend(r.violations);
            warnings.extend(r.warnings);
            checks_run += 1;
        }
        if opts.check_distribution {
            let r = distribution::validate(pack, config);
            violations.extend(r.violations);
            warnings.extend(r.warnings);
            checks_run += 1;
        }
        if opts.check_anomaly {
            let r = anomaly::detect(pack, historical_scores, opts.anomaly_threshold);
            violations.extend(r.violations);
            warnings.extend(r.warnings);
            checks_run += 1;
        }
        if opts.check_entropy {
            let r = uniqueness::validate(pack, opts.min_entropy_fraction);
            violations.extend(r.violations);
            warnings.extend(r.warnings);
            checks_run += 1;
        }

        let valid = violations.is_empty();
        let confidence = if checks_run == 0 || !valid {
            0.0
        } else if warnings.is_empty() {
            1.0
        } else {
            (1.0 - 0.05 * warnings.len() as f64).max(0.5)
        };
        let result = ValidationResult {
            valid,
            violations,
            warnings,
            confidence,
        };

        let notable = pack
            .best_rarity()
            .map_or(false, |r| r >= opts.notable_rarity);
        if !result.is_clean() || notable {
            self.record(pack, &result);
        }
        result
    }

    fn record(&mut self, pack: &Pack, result: &ValidationResult) {
        self.audit.log(SuspiciousActivityLogEntry {
            pack_summary: PackSummary::of(pack),
            violations: result.violations.clone(),
            timestamp: Utc::now(),
        });
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
