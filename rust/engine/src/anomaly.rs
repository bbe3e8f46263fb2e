use serde_json::json;

use crate::cards::{Pack, Rarity};
use crate::report::{Severity, ValidationResult, Violation, ViolationKind, Warning, WarningKind};

/// Minimum number of historical scores before the dispersion test speaks.
pub const MIN_HISTORY: usize = 10;

/// Deviations above the mean where the monitoring band starts.
pub const WARN_DEVIATIONS: f64 = 2.0;

/// Scalar luck score of a pack: the sum of rarity weights across its cards.
/// A standard all-common pack scores near the card count; a mythic alone
/// contributes 32.
pub fn rarity_score(pack: &Pack) -> f64 {
    pack.cards.iter().map(|c| c.rarity.weight()).sum()
}

/// Compares a pack's rarity score against a historical population and flags
/// a-priori-impossible rarity combinations.
///
/// The impossibility rule needs no history: two or more mythics, or one
/// mythic alongside two or more legendaries, cannot come out of any sane
/// slot configuration and is a critical [`ViolationKind::ImpossiblePack`].
///
/// The dispersion test is a z-score against the population mean. Scores
/// more than `threshold` deviations above the mean are a high-severity
/// [`ViolationKind::StatisticalAnomaly`]; the band between
/// [`WARN_DEVIATIONS`] and `threshold` is a warning for monitoring. With
/// fewer than [`MIN_HISTORY`] samples, or a population with no dispersion,
/// the test passes through rather than failing closed.
pub fn detect(pack: &Pack, historical_scores: &[f64], threshold: f64) -> ValidationResult {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    let mythics = pack
        .cards
        .iter()
        .filter(|c| c.rarity == Rarity::Mythic)
        .count();
    let legendaries = pack
        .cards
        .iter()
        .filter(|c| c.rarity == Rarity::Legendary)
        .count();
    if mythics >= 2 || (mythics >= 1 && legendaries >= 2) {
        tracing::warn!(
            pack_id = %pack.id,
            mythics,
            legendaries,
            "a-priori impossible rarity combination"
        );
        violations.push(Violation::new(
            ViolationKind::ImpossiblePack,
            Severity::Critical,
            format!(
                "{} mythic and {} legendary cards in a {}-card pack is not a plausible draw",
                mythics,
                legendaries,
                pack.cards.len()
            ),
            json!({
                "mythicCount": mythics,
                "legendaryCount": legendaries,
                "cardCount": pack.cards.len(),
            }),
        ));
    }

    if historical_scores.len() < MIN_HISTORY {
        tracing::debug!(
            samples = historical_scores.len(),
            "anomaly check passing through on sparse history"
        );
        return ValidationResult::from_parts(violations, warnings);
    }

    let score = rarity_score(pack);
    let n = historical_scores.len() as f64;
    let mean = historical_scores.iter().sum::<f64>() / n;
    let variance = historical_scores
        .iter()
        .map(|s| (s - mean) * (s - mean))
        .sum::<f64>()
        / n;
    let stdev = variance.sqrt();
    if stdev < f64::EPSILON {
        tracing::debug!("anomaly check passing through on zero-dispersion history");
        return ValidationResult::from_parts(violations, warnings);
    }

    let z = (score - mean) / stdev;
    if z > threshold {
        tracing::warn!(pack_id = %pack.id, score, mean, z, "rarity score statistical anomaly");
        violations.push(Violation::new(
            ViolationKind::StatisticalAnomaly,
            Severity::High,
            format!(
                "rarity score {:.1} is {:.1} deviations above the population mean {:.1}",
                score, z, mean
            ),
            json!({
                "score": score,
                "mean": mean,
                "stdev": stdev,
                "zScore": z,
                "threshold": threshold,
            }),
        ));
    } else if z > WARN_DEVIATIONS {
        warnings.push(Warning::new(
            WarningKind::StatisticalAnomaly,
            format!(
                "rarity score {:.1} is {:.1} deviations above the population mean {:.1}",
                score, z, mean
            ),
            json!({
                "score": score,
                "mean": mean,
                "stdev": stdev,
                "zScore": z,
            }),
        ));
    }

    ValidationResult::from_parts(violations, warnings)
}
