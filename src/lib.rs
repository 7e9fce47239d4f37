//! # Shopwright
//!
//! Procedural shop inventory generation for narrative-dice tabletop games.
//!
//! ## Architecture Overview
//!
//! A shop is generated from a validated [`ShopConfiguration`] in three steps:
//!
//! - **Candidate Pool**: the index of every catalog the shop category draws
//!   from is listed and concatenated ([`build_candidate_pool`])
//! - **Sampling**: candidates are drawn without replacement, filtered by legality
//!   and item type, and checked for availability ([`ItemSampler`])
//! - **Checks**: availability is decided by an external [`CheckEngine`], fed a
//!   difficulty derived from the item's rarity and the shop's location
//!
//! Catalogs and checks live behind async traits so the generator never reaches
//! into game state directly. [`InMemoryCatalog`] and [`DicePoolCheckEngine`] are
//! the bundled implementations used by the command line tool.

pub mod catalog;
pub mod check;
pub mod dice_helper;
pub mod shop;
pub mod utils;

pub use catalog::*;
pub use check::*;
pub use dice_helper::*;
pub use shop::*;
pub use utils::*;

/// Core error type for the shop generator.
#[derive(thiserror::Error, Debug)]
pub enum ShopError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Shop parameters were rejected before generation started
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A catalog index could not be listed
    #[error("Catalog '{catalog}' unavailable: {reason}")]
    CatalogUnavailable { catalog: String, reason: String },

    /// An item's details could not be fetched
    #[error("Item '{item}' in catalog '{catalog}' unavailable: {reason}")]
    ItemUnavailable {
        catalog: String,
        item: String,
        reason: String,
    },

    /// The checking actor or one of its skills could not be resolved
    #[error("Actor unavailable: {0}")]
    ActorUnavailable(String),
}

/// Result type used throughout the Shopwright codebase.
pub type ShopResult<T> = Result<T, ShopError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shop generation defaults.
pub mod config {
    /// Price percentage that leaves catalog prices unchanged
    pub const DEFAULT_BASE_PRICE_PERCENT: u32 = 100;

    /// Default lower bound on the number of items in a shop
    pub const DEFAULT_MIN_ITEMS: usize = 5;

    /// Default upper bound on the number of items in a shop
    pub const DEFAULT_MAX_ITEMS: usize = 10;

    /// Catalog holding armour
    pub const ARMOR_CATALOG: &str = "world.oggdudearmor";

    /// Catalog holding general gear
    pub const GEAR_CATALOG: &str = "world.oggdudegear";

    /// Catalog holding weapons
    pub const WEAPONS_CATALOG: &str = "world.oggdudeweapons";

    /// Catalog holding item attachments
    pub const ATTACHMENTS_CATALOG: &str = "world.oggdudeitemattachments";
}
