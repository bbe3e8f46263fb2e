use std::collections::BTreeMap;

use serde_json::json;

use crate::cards::Pack;
use crate::report::{Severity, ValidationResult, Violation, ViolationKind, Warning, WarningKind};

/// Default fraction of the theoretical maximum entropy below which a pack
/// is flagged as suspicious.
pub const DEFAULT_MIN_ENTROPY_FRACTION: f64 = 0.7;

fn identity_counts(pack: &Pack) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for card in &pack.cards {
        *counts.entry(card.id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Shannon entropy (base 2) of the card-identity distribution inside one
/// pack: `log2(n)` when all n identities are distinct, exactly 0 when they
/// are all identical.
pub fn shannon_entropy(pack: &Pack) -> f64 {
    let n = pack.cards.len();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let mut h = 0.0;
    for &count in identity_counts(pack).values() {
        let p = count as f64 / n;
        h -= p * p.log2();
    }
    h
}

/// Flags duplicate card identities and near-uniform packs.
///
/// Any exact identity repeat inside a single pack is a high-severity
/// [`ViolationKind::LowEntropy`] naming the duplicate, independent of the
/// threshold: the generator draws without replacement, so a repeat is an
/// internal contradiction. Entropy below `min_entropy_fraction` of the
/// theoretical maximum additionally emits a warning: suspicious, but not
/// proof of tampering. Packs of zero or one card pass.
pub fn validate(pack: &Pack, min_entropy_fraction: f64) -> ValidationResult {
    let n = pack.cards.len();
    if n <= 1 {
        return ValidationResult::pass();
    }

    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for (id, &count) in &identity_counts(pack) {
        if count > 1 {
            violations.push(Violation::new(
                ViolationKind::LowEntropy,
                Severity::High,
                format!("duplicate card identity {} appears {} times in one pack", id, count),
                json!({
                    "cardId": id,
                    "occurrences": count,
                }),
            ));
        }
    }

    let entropy = shannon_entropy(pack);
    let max_entropy = (n as f64).log2();
    if entropy < min_entropy_fraction * max_entropy {
        warnings.push(Warning::new(
            WarningKind::LowEntropy,
            format!(
                "identity entropy {:.3} is below {:.0}% of the maximum {:.3}",
                entropy,
                min_entropy_fraction * 100.0,
                max_entropy
            ),
            json!({
                "entropy": entropy,
                "maxEntropy": max_entropy,
                "minFraction": min_entropy_fraction,
            }),
        ));
    }

    ValidationResult::from_parts(violations, warnings)
}
