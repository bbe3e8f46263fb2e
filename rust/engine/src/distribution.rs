use serde_json::json;

use crate::cards::{Pack, PackConfiguration, Rarity, RaritySlot};
use crate::report::{Severity, ValidationResult, Violation, ViolationKind, Warning, WarningKind};

/// Joint slot probability below which a multi-hit pack is treated as
/// impossible rather than merely lucky.
pub const IMPOSSIBLE_JOINT_PROBABILITY: f64 = 1e-10;

/// Validates a pack's rarities against its declared slot configuration.
///
/// Each guaranteed slot requires an exact rarity match at its position; a
/// mismatch is a critical [`ViolationKind::InvalidRarityDistribution`]
/// naming the slot, the expected rarity and the actual one. A distribution
/// slot accepts any rarity in its key set as structurally legal; the
/// declared probabilities only feed the whole-pack plausibility judgment
/// and the anomaly scoring, not per-slot legality.
///
/// When every slot is legal, the joint probability of the observed rarity
/// assignment is checked: several top-tier cards whose combined slot odds
/// fall below [`IMPOSSIBLE_JOINT_PROBABILITY`] add a critical
/// [`ViolationKind::ImpossiblePack`]. A legal pack whose best rarity is
/// legendary or better gets a [`WarningKind::RarePull`] warning: telemetry,
/// not a cheat signal.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use packguard_engine::cards::{Card, HoloType, Pack, PackConfiguration, Rarity};
/// use packguard_engine::distribution::validate;
/// use packguard_engine::report::ViolationKind;
///
/// fn card(id: &str, rarity: Rarity) -> Card {
///     Card {
///         id: id.to_string(),
///         name: id.to_string(),
///         rarity,
///         card_type: "grill".to_string(),
///         is_holo: false,
///         holo_type: HoloType::None,
///     }
/// }
///
/// let config = PackConfiguration::standard();
/// let pack = Pack {
///     id: "pack-1".to_string(),
///     cards: vec![
///         card("c1", Rarity::Common),
///         card("c2", Rarity::Common),
///         card("c3", Rarity::Common),
///         card("u1", Rarity::Uncommon),
///         card("r1", Rarity::Rare),
///         card("r2", Rarity::Rare),
///     ],
///     opened_at: Utc::now(),
///     design: "classic".to_string(),
/// };
/// assert!(validate(&pack, &config).valid);
///
/// // a mythic in a guaranteed-common slot is a critical violation
/// let mut forged = pack.clone();
/// forged.cards[0] = card("m1", Rarity::Mythic);
/// let result = validate(&forged, &config);
/// assert!(!result.valid);
/// assert_eq!(
///     result.violations[0].kind,
///     ViolationKind::InvalidRarityDistribution
/// );
/// ```
pub fn validate(pack: &Pack, config: &PackConfiguration) -> ValidationResult {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    if pack.cards.len() != config.cards_per_pack {
        violations.push(Violation::new(
            ViolationKind::MalformedPack,
            Severity::Critical,
            format!(
                "pack holds {} cards but a {} pack produces {}",
                pack.cards.len(),
                config.pack_type,
                config.cards_per_pack
            ),
            json!({
                "cardCount": pack.cards.len(),
                "cardsPerPack": config.cards_per_pack,
                "packType": config.pack_type,
            }),
        ));
        return ValidationResult::from_parts(violations, warnings);
    }

    let mut slots_legal = true;
    for (i, (card, slot)) in pack.cards.iter().zip(config.slots.iter()).enumerate() {
        match slot {
            RaritySlot::Guaranteed(expected) => {
                if card.rarity != *expected {
                    slots_legal = false;
                    violations.push(Violation::new(
                        ViolationKind::InvalidRarityDistribution,
                        Severity::Critical,
                        format!(
                            "slot {} guarantees {} but holds {} ({})",
                            i,
                            expected.as_str(),
                            card.rarity.as_str(),
                            card.id
                        ),
                        json!({
                            "slot": i,
                            "expected": expected.as_str(),
                            "actual": card.rarity.as_str(),
                            "cardId": card.id,
                        }),
                    ));
                }
            }
            RaritySlot::Distribution(_) => {
                if !slot.allows(card.rarity) {
                    slots_legal = false;
                    violations.push(Violation::new(
                        ViolationKind::InvalidRarityDistribution,
                        Severity::Critical,
                        format!(
                            "slot {} distribution has no {} outcome ({})",
                            i,
                            card.rarity.as_str(),
                            card.id
                        ),
                        json!({
                            "slot": i,
                            "actual": card.rarity.as_str(),
                            "cardId": card.id,
                        }),
                    ));
                }
            }
        }
    }

    // whole-pack plausibility only makes sense once every slot is legal
    if slots_legal {
        let joint: f64 = pack
            .cards
            .iter()
            .zip(config.slots.iter())
            .map(|(card, slot)| slot.probability_of(card.rarity))
            .product();
        let top_tier = pack
            .cards
            .iter()
            .filter(|c| c.rarity >= Rarity::Legendary)
            .count();
        if top_tier >= 2 && joint < IMPOSSIBLE_JOINT_PROBABILITY {
            tracing::warn!(
                pack_id = %pack.id,
                joint_probability = joint,
                top_tier,
                "rarity assignment statistically impossible under declared slots"
            );
            violations.push(Violation::new(
                ViolationKind::ImpossiblePack,
                Severity::Critical,
                format!(
                    "{} top-tier cards with joint slot probability {:.3e}",
                    top_tier, joint
                ),
                json!({
                    "topTierCount": top_tier,
                    "jointProbability": joint,
                }),
            ));
        } else if pack
            .best_rarity()
            .map_or(false, |r| r >= Rarity::Legendary)
        {
            let best = pack.best_rarity().unwrap_or(Rarity::Common);
            warnings.push(Warning::new(
                WarningKind::RarePull,
                format!(
                    "best pull {} is an unusual outcome for a {} pack",
                    best.as_str(),
                    config.pack_type
                ),
                json!({
                    "bestRarity": best.as_str(),
                    "packType": config.pack_type,
                }),
            ));
        }
    }

    ValidationResult::from_parts(violations, warnings)
}
