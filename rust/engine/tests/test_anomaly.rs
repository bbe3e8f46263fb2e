use chrono::Utc;

use packguard_engine::anomaly::{detect, rarity_score, MIN_HISTORY};
use packguard_engine::cards::{Card, HoloType, Pack, Rarity};
use packguard_engine::report::{Severity, ViolationKind, WarningKind};

const THRESHOLD: f64 = 3.0;

fn card(id: &str, rarity: Rarity) -> Card {
    Card {
        id: id.to_string(),
        name: id.to_string(),
        rarity,
        card_type: "grill".to_string(),
        is_holo: false,
        holo_type: HoloType::None,
    }
}

fn pack(rarities: &[Rarity]) -> Pack {
    Pack {
        id: "pack-anomaly".to_string(),
        cards: rarities
            .iter()
            .enumerate()
            .map(|(i, &r)| card(&format!("card-{}", i), r))
            .collect(),
        opened_at: Utc::now(),
        design: "classic".to_string(),
    }
}

/// Population with mean 12 and stdev 2.
fn history() -> Vec<f64> {
    (0..20).map(|i| if i % 2 == 0 { 10.0 } else { 14.0 }).collect()
}

#[test]
fn rarity_score_sums_tier_weights() {
    let p = pack(&[
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ]);
    assert_eq!(rarity_score(&p), 1.0 + 2.0 + 4.0 + 8.0 + 16.0 + 32.0);
}

#[test]
fn six_mythics_are_impossible_even_with_no_history() {
    let p = pack(&[Rarity::Mythic; 6]);
    let result = detect(&p, &[], THRESHOLD);
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::ImpossiblePack);
    assert_eq!(result.violations[0].severity, Severity::Critical);
}

#[test]
fn one_mythic_with_two_legendaries_is_impossible() {
    let p = pack(&[
        Rarity::Mythic,
        Rarity::Legendary,
        Rarity::Legendary,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
    ]);
    let result = detect(&p, &[], THRESHOLD);
    assert!(!result.valid);
    assert_eq!(result.violations[0].kind, ViolationKind::ImpossiblePack);
}

#[test]
fn a_single_mythic_passes_through_on_sparse_history() {
    let p = pack(&[
        Rarity::Mythic,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
    ]);
    let sparse: Vec<f64> = vec![10.0; MIN_HISTORY - 1];
    let result = detect(&p, &sparse, THRESHOLD);
    assert!(result.valid, "sparse history must never fail closed");
    assert!(result.warnings.is_empty());
}

#[test]
fn score_far_above_the_population_is_a_violation() {
    // legendary + epic + four commons scores 28, z = 8 against the population
    let p = pack(&[
        Rarity::Legendary,
        Rarity::Epic,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
    ]);
    let result = detect(&p, &history(), THRESHOLD);
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.kind, ViolationKind::StatisticalAnomaly);
    assert_eq!(v.severity, Severity::High);
    assert!(v.details["zScore"].as_f64().unwrap() > THRESHOLD);
}

#[test]
fn moderately_lucky_score_is_only_a_warning() {
    // epic + two rares + common scores 17, z = 2.5: the monitoring band
    let p = pack(&[Rarity::Epic, Rarity::Rare, Rarity::Rare, Rarity::Common]);
    let result = detect(&p, &history(), THRESHOLD);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::StatisticalAnomaly);
}

#[test]
fn ordinary_score_is_clean() {
    // two rares and four commons scores 12, exactly the population mean
    let p = pack(&[
        Rarity::Rare,
        Rarity::Rare,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
    ]);
    let result = detect(&p, &history(), THRESHOLD);
    assert!(result.valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn zero_dispersion_history_passes_through() {
    let flat = vec![10.0; 25];
    let p = pack(&[
        Rarity::Legendary,
        Rarity::Epic,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
        Rarity::Common,
    ]);
    let result = detect(&p, &flat, THRESHOLD);
    assert!(result.valid, "a population without dispersion supports no judgment");
}
