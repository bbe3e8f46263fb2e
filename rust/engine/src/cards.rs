use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Rarity tier of a card, ordered from most common to most scarce.
/// Ordering is significant: `Rarity::Mythic > Rarity::Common`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Baseline tier, the bulk of every set
    Common = 1,
    /// Uncommon tier
    Uncommon,
    /// Rare tier
    Rare,
    /// Epic tier
    Epic,
    /// Legendary tier
    Legendary,
    /// Mythic tier, the scarcest printing
    Mythic,
}

impl Rarity {
    pub fn from_rank(v: u8) -> Rarity {
        match v {
            1 => Rarity::Common,
            2 => Rarity::Uncommon,
            3 => Rarity::Rare,
            4 => Rarity::Epic,
            5 => Rarity::Legendary,
            _ => Rarity::Mythic,
        }
    }

    /// Numeric rank of the tier, 1 (common) through 6 (mythic).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Scoring weight of the tier, doubling per rank: common 1.0 up to mythic 32.0.
    pub fn weight(self) -> f64 {
        f64::from(1u32 << (self.rank() - 1))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}

pub fn all_rarities() -> [Rarity; 6] {
    [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ]
}

/// Holographic treatment of a card. `None` means a plain printing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoloType {
    /// No holographic treatment
    None,
    /// Standard foil layer
    Foil,
    /// Reverse holo (background foiled, art plain)
    Reverse,
    /// Full rainbow treatment
    Rainbow,
}

impl HoloType {
    pub fn as_str(self) -> &'static str {
        match self {
            HoloType::None => "none",
            HoloType::Foil => "foil",
            HoloType::Reverse => "reverse",
            HoloType::Rainbow => "rainbow",
        }
    }
}

/// A single collectible card as the upstream generator produces it.
/// Read-only inside this engine; validation never mutates a card.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable card identifier (e.g. "bbq_dad_001")
    pub id: String,
    /// Display name; not part of the canonical fingerprint
    pub name: String,
    /// Rarity tier of this printing
    pub rarity: Rarity,
    /// Free-form type tag (the upstream API calls this "type")
    #[serde(rename = "type")]
    pub card_type: String,
    /// Whether this printing is holographic
    pub is_holo: bool,
    /// Which holographic treatment, `HoloType::None` when plain
    pub holo_type: HoloType,
}

impl Card {
    /// True when the holo flag and holo type agree: `is_holo` iff the
    /// treatment is anything other than `HoloType::None`.
    pub fn holo_consistent(&self) -> bool {
        self.is_holo == (self.holo_type != HoloType::None)
    }
}

/// One opened pack: a fixed, ordered set of drawn cards presented as a
/// single opening event. Created by the generator, consumed read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    /// Unique pack identifier
    pub id: String,
    /// The drawn cards, in slot order
    pub cards: Vec<Card>,
    /// When the pack was opened
    pub opened_at: DateTime<Utc>,
    /// Pack art/design tag
    pub design: String,
}

impl Pack {
    /// Highest rarity present in the pack, `None` for an empty pack.
    pub fn best_rarity(&self) -> Option<Rarity> {
        self.cards.iter().map(|c| c.rarity).max()
    }
}

/// Legal content of one pack position: either an exact rarity or a
/// probability distribution over rarities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RaritySlot {
    /// Exact rarity required at this position
    Guaranteed(Rarity),
    /// Any rarity in the key set is legal; values are draw probabilities
    Distribution(BTreeMap<Rarity, f64>),
}

impl RaritySlot {
    /// Whether a card of the given rarity is structurally legal in this slot.
    pub fn allows(&self, rarity: Rarity) -> bool {
        match self {
            RaritySlot::Guaranteed(r) => *r == rarity,
            RaritySlot::Distribution(probs) => probs.contains_key(&rarity),
        }
    }

    /// Declared probability of drawing the given rarity from this slot.
    pub fn probability_of(&self, rarity: Rarity) -> f64 {
        match self {
            RaritySlot::Guaranteed(r) => {
                if *r == rarity {
                    1.0
                } else {
                    0.0
                }
            }
            RaritySlot::Distribution(probs) => probs.get(&rarity).copied().unwrap_or(0.0),
        }
    }
}

/// Declared generative process for one pack product: how many cards,
/// what each slot may contain, and the holo odds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackConfiguration {
    /// Number of cards a pack of this product contains
    pub cards_per_pack: usize,
    /// Ordered slot rules, one per card position
    pub slots: Vec<RaritySlot>,
    /// Probability that any given card gets a holo treatment
    pub holo_chance: f64,
    /// Product tag ("standard", "premium", ...)
    pub pack_type: String,
}

impl PackConfiguration {
    /// Checks internal consistency of the configuration itself.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when the slot count does
    /// not match `cards_per_pack`, a distribution slot is empty, or any
    /// declared probability is outside (0, 1].
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.slots.len() != self.cards_per_pack {
            return Err(EngineError::InvalidConfiguration {
                reason: format!(
                    "{} slots declared for {} cards per pack",
                    self.slots.len(),
                    self.cards_per_pack
                ),
            });
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if let RaritySlot::Distribution(probs) = slot {
                if probs.is_empty() {
                    return Err(EngineError::InvalidConfiguration {
                        reason: format!("slot {} has an empty rarity distribution", i),
                    });
                }
                for (rarity, p) in probs {
                    if *p <= 0.0 || *p > 1.0 {
                        return Err(EngineError::InvalidConfiguration {
                            reason: format!(
                                "slot {} declares probability {} for {}",
                                i,
                                p,
                                rarity.as_str()
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The standard six-card product: three commons, one uncommon, a
    /// wildcard slot and a hit slot.
    pub fn standard() -> Self {
        let mut wildcard = BTreeMap::new();
        wildcard.insert(Rarity::Uncommon, 0.50);
        wildcard.insert(Rarity::Rare, 0.35);
        wildcard.insert(Rarity::Epic, 0.12);
        wildcard.insert(Rarity::Legendary, 0.025);
        wildcard.insert(Rarity::Mythic, 0.005);
        let mut hit = BTreeMap::new();
        hit.insert(Rarity::Rare, 0.70);
        hit.insert(Rarity::Epic, 0.20);
        hit.insert(Rarity::Legendary, 0.08);
        hit.insert(Rarity::Mythic, 0.02);
        Self {
            cards_per_pack: 6,
            slots: vec![
                RaritySlot::Guaranteed(Rarity::Common),
                RaritySlot::Guaranteed(Rarity::Common),
                RaritySlot::Guaranteed(Rarity::Common),
                RaritySlot::Guaranteed(Rarity::Uncommon),
                RaritySlot::Distribution(wildcard),
                RaritySlot::Distribution(hit),
            ],
            holo_chance: 0.15,
            pack_type: "standard".to_string(),
        }
    }

    /// The premium six-card product: no commons, two distribution slots,
    /// higher holo odds.
    pub fn premium() -> Self {
        let mut wildcard = BTreeMap::new();
        wildcard.insert(Rarity::Rare, 0.60);
        wildcard.insert(Rarity::Epic, 0.30);
        wildcard.insert(Rarity::Legendary, 0.08);
        wildcard.insert(Rarity::Mythic, 0.02);
        let mut hit = BTreeMap::new();
        hit.insert(Rarity::Epic, 0.55);
        hit.insert(Rarity::Legendary, 0.35);
        hit.insert(Rarity::Mythic, 0.10);
        Self {
            cards_per_pack: 6,
            slots: vec![
                RaritySlot::Guaranteed(Rarity::Uncommon),
                RaritySlot::Guaranteed(Rarity::Uncommon),
                RaritySlot::Guaranteed(Rarity::Rare),
                RaritySlot::Guaranteed(Rarity::Rare),
                RaritySlot::Distribution(wildcard),
                RaritySlot::Distribution(hit),
            ],
            holo_chance: 0.35,
            pack_type: "premium".to_string(),
        }
    }
}
