//! # Shop Configuration
//!
//! Validated generation parameters, and the raw request they are built from.

use crate::config::{
    ARMOR_CATALOG, ATTACHMENTS_CATALOG, DEFAULT_BASE_PRICE_PERCENT, DEFAULT_MAX_ITEMS,
    DEFAULT_MIN_ITEMS, GEAR_CATALOG, WEAPONS_CATALOG,
};
use crate::{ActorId, CatalogId, ItemType, ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of stock a shop carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Carries every item type
    General,
    Armor,
    Gear,
    Weapon,
    /// Consumables only; stocked from the gear catalog
    #[serde(alias = "nerf_herder")]
    Consumable,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Armor,
        Category::Gear,
        Category::Weapon,
        Category::Consumable,
    ];

    /// Catalogs this kind of shop draws candidates from, in draw order.
    pub fn catalogs(self) -> Vec<CatalogId> {
        let ids: &[&str] = match self {
            Category::General => &[
                ARMOR_CATALOG,
                GEAR_CATALOG,
                WEAPONS_CATALOG,
                ATTACHMENTS_CATALOG,
            ],
            Category::Armor => &[ARMOR_CATALOG],
            Category::Gear | Category::Consumable => &[GEAR_CATALOG],
            Category::Weapon => &[WEAPONS_CATALOG],
        };
        ids.iter().map(|id| CatalogId::new(*id)).collect()
    }

    /// Item types this kind of shop will stock.
    pub fn accepted_types(self) -> &'static [ItemType] {
        match self {
            Category::General => &ItemType::ALL,
            Category::Armor => &[ItemType::Armour],
            Category::Gear | Category::Consumable => &[ItemType::Gear],
            Category::Weapon => &[ItemType::Weapon],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Armor => "armor",
            Category::Gear => "gear",
            Category::Weapon => "weapon",
            Category::Consumable => "consumable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Category::General),
            "armor" | "armour" => Ok(Category::Armor),
            "gear" => Ok(Category::Gear),
            "weapon" | "weapons" => Ok(Category::Weapon),
            "consumable" | "nerf_herder" => Ok(Category::Consumable),
            other => Err(ShopError::InvalidConfiguration(format!(
                "unknown shop type '{}'",
                other
            ))),
        }
    }
}

/// How easy it is to find goods where the shop is located.
///
/// Positive modifiers make items rarer (and pricier), negative ones more common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationModifier {
    MinusTwo,
    MinusOne,
    NoChange,
    PlusOne,
    PlusTwo,
    PlusThree,
    PlusFour,
}

impl LocationModifier {
    pub const ALL: [LocationModifier; 7] = [
        LocationModifier::MinusTwo,
        LocationModifier::MinusOne,
        LocationModifier::NoChange,
        LocationModifier::PlusOne,
        LocationModifier::PlusTwo,
        LocationModifier::PlusThree,
        LocationModifier::PlusFour,
    ];

    /// Shift applied to an item's rarity.
    pub fn value(self) -> i32 {
        match self {
            LocationModifier::MinusTwo => -2,
            LocationModifier::MinusOne => -1,
            LocationModifier::NoChange => 0,
            LocationModifier::PlusOne => 1,
            LocationModifier::PlusTwo => 2,
            LocationModifier::PlusThree => 3,
            LocationModifier::PlusFour => 4,
        }
    }

    /// Price multiplier that comes with the location.
    ///
    /// Locations easier than normal do not discount prices.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopwright::LocationModifier;
    ///
    /// assert_eq!(LocationModifier::MinusTwo.price_modifier(), 1);
    /// assert_eq!(LocationModifier::PlusOne.price_modifier(), 1);
    /// assert_eq!(LocationModifier::PlusThree.price_modifier(), 3);
    /// ```
    pub fn price_modifier(self) -> u32 {
        match self {
            LocationModifier::MinusTwo
            | LocationModifier::MinusOne
            | LocationModifier::NoChange
            | LocationModifier::PlusOne => 1,
            LocationModifier::PlusTwo => 2,
            LocationModifier::PlusThree => 3,
            LocationModifier::PlusFour => 4,
        }
    }

    pub fn from_value(value: i32) -> ShopResult<Self> {
        Self::ALL
            .into_iter()
            .find(|modifier| modifier.value() == value)
            .ok_or_else(|| {
                ShopError::InvalidConfiguration(format!(
                    "location modifier {} is outside -2..=4",
                    value
                ))
            })
    }
}

impl FromStr for LocationModifier {
    type Err = ShopError;

    /// Accepts either the named form (`plus_two`) or the number (`2`, `+2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "minus_two" => Ok(LocationModifier::MinusTwo),
            "minus_one" => Ok(LocationModifier::MinusOne),
            "no_change" => Ok(LocationModifier::NoChange),
            "plus_one" => Ok(LocationModifier::PlusOne),
            "plus_two" => Ok(LocationModifier::PlusTwo),
            "plus_three" => Ok(LocationModifier::PlusThree),
            "plus_four" => Ok(LocationModifier::PlusFour),
            other => match other.parse::<i32>() {
                Ok(value) => Self::from_value(value),
                Err(_) => Err(ShopError::InvalidConfiguration(format!(
                    "unknown location '{}'",
                    other
                ))),
            },
        }
    }
}

/// A shop request as submitted by a user, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRequest {
    /// Whether restricted items may be stocked
    #[serde(default)]
    pub shady: bool,
    pub shop_type: String,
    #[serde(default = "default_min_items")]
    pub min_items: usize,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_location")]
    pub location: String,
    pub actor: String,
    #[serde(default = "default_base_price")]
    pub base_price: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_items() -> usize {
    DEFAULT_MIN_ITEMS
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_location() -> String {
    "no_change".to_string()
}

fn default_base_price() -> u32 {
    DEFAULT_BASE_PRICE_PERCENT
}

/// Immutable parameters for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopConfiguration {
    allow_restricted_items: bool,
    category: Category,
    source_catalogs: Vec<CatalogId>,
    min_item_count: usize,
    max_item_count: usize,
    location_modifier: LocationModifier,
    price_modifier: u32,
    base_price_percent: u32,
    checking_actor: ActorId,
    seed: Option<u64>,
}

impl ShopConfiguration {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::InvalidConfiguration`] if `min_items > max_items` or
    /// the checking actor id is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopwright::{ActorId, Category, LocationModifier, ShopConfiguration};
    ///
    /// let config = ShopConfiguration::new(
    ///     Category::Weapon,
    ///     false,
    ///     2,
    ///     6,
    ///     LocationModifier::PlusTwo,
    ///     100,
    ///     ActorId::new("actor-1"),
    /// )
    /// .unwrap();
    /// assert_eq!(config.price_modifier(), 2);
    /// assert_eq!(config.source_catalogs().len(), 1);
    /// ```
    pub fn new(
        category: Category,
        allow_restricted_items: bool,
        min_item_count: usize,
        max_item_count: usize,
        location_modifier: LocationModifier,
        base_price_percent: u32,
        checking_actor: ActorId,
    ) -> ShopResult<Self> {
        if min_item_count > max_item_count {
            return Err(ShopError::InvalidConfiguration(format!(
                "minimum item count {} exceeds maximum {}",
                min_item_count, max_item_count
            )));
        }
        if checking_actor.as_str().trim().is_empty() {
            return Err(ShopError::InvalidConfiguration(
                "a checking actor is required".to_string(),
            ));
        }

        Ok(Self {
            allow_restricted_items,
            category,
            source_catalogs: category.catalogs(),
            min_item_count,
            max_item_count,
            location_modifier,
            price_modifier: location_modifier.price_modifier(),
            base_price_percent,
            checking_actor,
            seed: None,
        })
    }

    /// Fixes the random seed so the run is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn allow_restricted_items(&self) -> bool {
        self.allow_restricted_items
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn source_catalogs(&self) -> &[CatalogId] {
        &self.source_catalogs
    }

    pub fn min_item_count(&self) -> usize {
        self.min_item_count
    }

    pub fn max_item_count(&self) -> usize {
        self.max_item_count
    }

    pub fn location_modifier(&self) -> LocationModifier {
        self.location_modifier
    }

    pub fn price_modifier(&self) -> u32 {
        self.price_modifier
    }

    pub fn base_price_percent(&self) -> u32 {
        self.base_price_percent
    }

    pub fn checking_actor(&self) -> &ActorId {
        &self.checking_actor
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether the shop stocks items of this type.
    pub fn accepts(&self, item_type: ItemType) -> bool {
        self.category.accepted_types().contains(&item_type)
    }
}

impl TryFrom<ShopRequest> for ShopConfiguration {
    type Error = ShopError;

    fn try_from(request: ShopRequest) -> Result<Self, Self::Error> {
        let category = request.shop_type.parse::<Category>()?;
        let location = request.location.parse::<LocationModifier>()?;

        let config = ShopConfiguration::new(
            category,
            request.shady,
            request.min_items,
            request.max_items,
            location,
            request.base_price,
            ActorId(request.actor),
        )?;

        Ok(match request.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        })
    }
}
