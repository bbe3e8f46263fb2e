use crate::cards::{Card, Pack};

/// Canonical token for one card, built from stable fields only. Volatile
/// presentation state never participates, so the token survives UI churn.
pub fn canonical_token(card: &Card) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        card.id,
        card.rarity.as_str(),
        card.card_type,
        card.is_holo,
        card.holo_type.as_str()
    )
}

/// Order-independent content fingerprint of a pack.
///
/// Card tokens are sorted lexicographically before digesting, so identical
/// multisets hash identically under any permutation, and any change to a
/// stable card field produces a different digest.
pub fn fingerprint(pack: &Pack) -> String {
    let mut tokens: Vec<String> = pack.cards.iter().map(canonical_token).collect();
    tokens.sort();
    blake3::hash(tokens.join("\n").as_bytes()).to_hex().to_string()
}
