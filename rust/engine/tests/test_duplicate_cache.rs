use chrono::{Duration, TimeZone, Utc};

use packguard_engine::cache::DuplicateCache;
use packguard_engine::cards::{Card, HoloType, Pack, Rarity};
use packguard_engine::report::{Severity, ViolationKind};

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

fn pack(id: &str, card_ids: &[&str]) -> Pack {
    Pack {
        id: id.to_string(),
        cards: card_ids.iter().map(|c| card(c, Rarity::Common)).collect(),
        opened_at: Utc::now(),
        design: "classic".to_string(),
    }
}

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

#[test]
fn first_sight_is_valid_with_full_confidence() {
    let mut cache = DuplicateCache::new();
    let result = cache.check_and_record_at(&pack("p1", &["a", "b"]), t0());
    assert!(result.valid);
    assert_eq!(result.confidence, 1.0);
    assert!(result.violations.is_empty());
    assert_eq!(cache.len(), 1);
}

#[test]
fn repeat_within_ttl_is_rejected_with_one_critical_violation() {
    let mut cache = DuplicateCache::new();
    let p = pack("p1", &["a", "b"]);
    assert!(cache.check_and_record_at(&p, t0()).valid);

    // same content, different pack id, ten minutes later
    let resubmitted = pack("p2", &["a", "b"]);
    let result = cache.check_and_record_at(&resubmitted, t0() + Duration::minutes(10));
    assert!(!result.valid);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.violations.len(), 1, "exactly one violation expected");
    assert_eq!(result.violations[0].kind, ViolationKind::DuplicatePackDetected);
    assert_eq!(result.violations[0].severity, Severity::Critical);
}

#[test]
fn same_fingerprint_is_novel_again_after_ttl_expiry() {
    let mut cache = DuplicateCache::with_ttl(Duration::minutes(5));
    let p = pack("p1", &["a", "b"]);
    assert!(cache.check_and_record_at(&p, t0()).valid);

    // expired, treated as novel and re-recorded
    let after_expiry = cache.check_and_record_at(&p, t0() + Duration::minutes(6));
    assert!(after_expiry.valid);

    // the re-recording restarts the window
    let shortly_after = cache.check_and_record_at(&p, t0() + Duration::minutes(8));
    assert!(!shortly_after.valid);
}

#[test]
fn different_content_does_not_collide() {
    let mut cache = DuplicateCache::new();
    assert!(cache.check_and_record_at(&pack("p1", &["a", "b"]), t0()).valid);
    assert!(cache.check_and_record_at(&pack("p2", &["a", "c"]), t0()).valid);
    assert_eq!(cache.len(), 2);
}

#[test]
fn card_order_does_not_evade_the_cache() {
    let mut cache = DuplicateCache::new();
    assert!(cache.check_and_record_at(&pack("p1", &["a", "b", "c"]), t0()).valid);
    let shuffled = pack("p2", &["c", "a", "b"]);
    let result = cache.check_and_record_at(&shuffled, t0() + Duration::minutes(1));
    assert!(!result.valid, "reordered cards are the same content");
}

#[test]
fn clear_forgets_everything() {
    let mut cache = DuplicateCache::new();
    let p = pack("p1", &["a"]);
    assert!(cache.check_and_record_at(&p, t0()).valid);
    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.check_and_record_at(&p, t0() + Duration::minutes(1)).valid);
}

#[test]
fn wall_clock_entry_point_records_normally() {
    let mut cache = DuplicateCache::new();
    let p = pack("p1", &["a"]);
    assert!(cache.check_and_record(&p).valid);
    assert!(!cache.check_and_record(&p).valid);
}
