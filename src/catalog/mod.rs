//! # Catalog Module
//!
//! Item catalogs the shop draws its stock from.
//!
//! A catalog is anything that can list an index of item references and fetch
//! the full details for one of them. The generator only ever talks to the
//! [`CatalogProvider`] trait; [`InMemoryCatalog`] is the bundled implementation.

pub mod memory;

pub use memory::*;

use crate::{ShopError, ShopResult};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog (a compendium of items).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a single item within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(pub String);

impl ItemRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of item as stored in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Gear,
    #[serde(alias = "armor")]
    Armour,
    /// A mod for another item; its target type is carried separately
    #[serde(rename = "itemattachment")]
    Attachment,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Weapon,
        ItemType::Gear,
        ItemType::Armour,
        ItemType::Attachment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Gear => "gear",
            ItemType::Armour => "armour",
            ItemType::Attachment => "itemattachment",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(ItemType::Weapon),
            "gear" => Ok(ItemType::Gear),
            "armour" | "armor" => Ok(ItemType::Armour),
            "itemattachment" | "attachment" => Ok(ItemType::Attachment),
            other => Err(ShopError::InvalidConfiguration(format!(
                "unknown item type '{}'",
                other
            ))),
        }
    }
}

/// One row of a catalog index: enough to draw an item, not to evaluate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub item_ref: ItemRef,
    pub display_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// An index entry tagged with the catalog it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub catalog: CatalogId,
    pub item_ref: ItemRef,
    pub display_name: String,
    pub image: Option<String>,
}

impl CatalogEntry {
    pub fn new(catalog: CatalogId, entry: IndexEntry) -> Self {
        Self {
            catalog,
            item_ref: entry.item_ref,
            display_name: entry.display_name,
            image: entry.image,
        }
    }
}

/// Full detail of a candidate item, as fetched from its catalog.
///
/// This is a read-only snapshot; the generator never writes back to a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub catalog: CatalogId,
    pub item_ref: ItemRef,
    pub name: String,
    pub image: Option<String>,
    pub item_type: ItemType,
    /// For attachments, the type of item the attachment modifies
    pub attachment_type: Option<ItemType>,
    pub is_restricted: bool,
    pub rarity: i32,
    pub base_price: u32,
}

/// Source of catalog indexes and item details.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Lists the index of a catalog without fetching item details.
    async fn list_index(&self, catalog: &CatalogId) -> ShopResult<Vec<IndexEntry>>;

    /// Fetches the full details of one item.
    async fn fetch_detail(&self, catalog: &CatalogId, item: &ItemRef)
        -> ShopResult<CandidateItem>;
}

/// Builds the candidate pool from the given catalogs, in order.
///
/// No filtering happens here: legality and item type are only known once an
/// item's details are fetched, which the sampler does lazily.
///
/// # Errors
///
/// Returns [`ShopError::CatalogUnavailable`] if any catalog cannot be listed.
pub async fn build_candidate_pool<P>(
    provider: &P,
    catalogs: &[CatalogId],
) -> ShopResult<Vec<CatalogEntry>>
where
    P: CatalogProvider + ?Sized,
{
    let mut pool = Vec::new();

    for catalog in catalogs {
        let index = provider.list_index(catalog).await.map_err(|e| {
            warn!("Failed to list catalog {}: {}", catalog, e);
            match e {
                ShopError::CatalogUnavailable { .. } => e,
                other => ShopError::CatalogUnavailable {
                    catalog: catalog.to_string(),
                    reason: other.to_string(),
                },
            }
        })?;
        debug!("Catalog {} lists {} items", catalog, index.len());

        pool.extend(
            index
                .into_iter()
                .map(|entry| CatalogEntry::new(catalog.clone(), entry)),
        );
    }

    Ok(pool)
}
