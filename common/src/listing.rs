use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::UserId;

/// Unique listing identifier (creation-timestamp based for new listings).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ListingId)
    }
}

/// Category of produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Herbs,
    Other,
}

impl Category {
    /// Every category a farmer can list under.
    pub const ALL: [Category; 6] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Dairy,
        Category::Grains,
        Category::Herbs,
        Category::Other,
    ];

    /// Categories offered as browse chips on the buyer side (after "all").
    pub const BROWSE: [Category; 5] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Dairy,
        Category::Grains,
        Category::Herbs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Dairy => "dairy",
            Category::Grains => "grains",
            Category::Herbs => "herbs",
            Category::Other => "other",
        }
    }

    /// Glyph shown next to a listing row.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::Vegetables => "🥕",
            Category::Fruits => "🍎",
            Category::Dairy => "🥛",
            Category::Grains => "🌾",
            Category::Herbs | Category::Other => "🌿",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Public details of the farm selling a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub farmer: UserId,
    pub farm_name: String,
    pub location: String,
    /// Pre-formatted distance from the buyer, e.g. "5.2 km".
    pub distance: String,
    pub verified: bool,
}

/// A single farm's offer of a produce item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub produce_name: String,
    /// Quantity text such as "50 kg"; read through [`crate::quantity::parse_quantity`].
    pub amount: String,
    pub price_per_unit: f64,
    pub expiration_date: NaiveDate,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub seller: FarmProfile,
}

/// Every field of a listing that an edit may replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPatch {
    pub produce_name: String,
    pub amount: String,
    pub price_per_unit: f64,
    pub expiration_date: NaiveDate,
    pub category: Category,
    pub description: Option<String>,
}

impl Listing {
    /// Overwrite everything except the id and seller.
    pub fn apply(&mut self, patch: ListingPatch) {
        self.produce_name = patch.produce_name;
        self.amount = patch.amount;
        self.price_per_unit = patch.price_per_unit;
        self.expiration_date = patch.expiration_date;
        self.category = patch.category;
        self.description = patch.description;
    }
}
