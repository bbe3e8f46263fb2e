//! # packguard-engine: Loot Pack Integrity Engine
//!
//! The integrity-and-fairness layer for loot pack openings. After the
//! upstream generator draws a pack of cards, this engine decides whether the
//! result may be accepted before any reward is granted: it defends against
//! replay/forgery, distributional violations, and statistically implausible
//! or degenerate outcomes. It never generates cards, never performs
//! transport, and keeps audit records in process memory only.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card, Rarity, Pack and PackConfiguration data model
//! - [`hashing`] - Canonical order-independent pack fingerprint
//! - [`entropy`] - Cryptographically strong entropy and fairness commitments
//! - [`cache`] - TTL-bound duplicate submission cache
//! - [`distribution`] - Per-slot rarity validation against the configuration
//! - [`anomaly`] - Rarity scoring and population anomaly detection
//! - [`uniqueness`] - Shannon entropy of in-pack card identities
//! - [`engine`] - Validation orchestrator over the four checks
//! - [`audit`] - Bounded in-memory log of flagged runs
//! - [`report`] - Violation/Warning/ValidationResult types and formatter
//! - [`errors`] - Operational error types
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use packguard_engine::cards::{Card, HoloType, Pack, PackConfiguration, Rarity};
//! use packguard_engine::engine::ValidationEngine;
//!
//! fn card(id: &str, rarity: Rarity) -> Card {
//!     Card {
//!         id: id.to_string(),
//!         name: id.to_string(),
//!         rarity,
//!         card_type: "grill".to_string(),
//!         is_holo: false,
//!         holo_type: HoloType::None,
//!     }
//! }
//!
//! let pack = Pack {
//!     id: "pack-0001".to_string(),
//!     cards: vec![
//!         card("c1", Rarity::Common),
//!         card("c2", Rarity::Common),
//!         card("c3", Rarity::Common),
//!         card("u1", Rarity::Uncommon),
//!         card("r1", Rarity::Rare),
//!         card("r2", Rarity::Rare),
//!     ],
//!     opened_at: Utc::now(),
//!     design: "classic".to_string(),
//! };
//!
//! let mut engine = ValidationEngine::new();
//! let result = engine.validate(&pack, &PackConfiguration::standard(), &[]);
//! assert!(result.valid);
//!
//! // resubmitting the same content inside the window is rejected
//! let replay = engine.validate(&pack, &PackConfiguration::standard(), &[]);
//! assert!(!replay.valid);
//! ```
//!
//! ## Order-Independent Fingerprints
//!
//! The duplicate cache keys on a canonical content hash, so reordering the
//! cards of a pack never changes its identity:
//!
//! ```rust
//! use chrono::Utc;
//! use packguard_engine::cards::{Card, HoloType, Pack, Rarity};
//! use packguard_engine::hashing::fingerprint;
//!
//! let card = |id: &str| Card {
//!     id: id.to_string(),
//!     name: id.to_string(),
//!     rarity: Rarity::Common,
//!     card_type: "grill".to_string(),
//!     is_holo: false,
//!     holo_type: HoloType::None,
//! };
//!
//! let mut pack = Pack {
//!     id: "pack-0002".to_string(),
//!     cards: vec![card("a"), card("b"), card("c")],
//!     opened_at: Utc::now(),
//!     design: "classic".to_string(),
//! };
//! let original = fingerprint(&pack);
//! pack.cards.reverse();
//! assert_eq!(fingerprint(&pack), original);
//! ```
//!
//! ## Provably-Fair Commitments
//!
//! Publish a commitment before generation, reveal the raw entropy after,
//! and any party can re-verify:
//!
//! ```rust
//! use packguard_engine::entropy::{commitment, server_entropy, verify_commitment};
//!
//! let secret = server_entropy().expect("os entropy");
//! let published = commitment(&secret);
//! // ... generation happens, then the secret is revealed ...
//! assert!(verify_commitment(&published, &secret));
//! ```

pub mod anomaly;
pub mod audit;
pub mod cache;
pub mod cards;
pub mod distribution;
pub mod engine;
pub mod entropy;
pub mod errors;
pub mod hashing;
pub mod report;
pub mod uniqueness;
