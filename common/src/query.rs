use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::listing::{Category, Listing};

/// Category half of a filter: a concrete category or the `all` wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Chips shown on the buyer side, in display order.
    pub fn browse_chips() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::BROWSE.into_iter().map(CategoryFilter::Only))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Which text fields the search box looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Produce name only (farmer side).
    ProduceOnly,
    /// Produce name or farm name (buyer side).
    #[default]
    ProduceAndFarm,
}

/// Free-text query plus category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub search_text: String,
    pub category: CategoryFilter,
    pub scope: SearchScope,
}

impl ListingFilter {
    pub fn new(search_text: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_text: search_text.into(),
            category,
            scope: SearchScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Both the text and the category predicate hold.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing) && self.category.admits(listing.category)
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        let contains = |hay: &str| hay.to_lowercase().contains(&needle);

        contains(&listing.produce_name)
            || (self.scope == SearchScope::ProduceAndFarm && contains(&listing.seller.farm_name))
    }

    /// Matching listings in their original relative order.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<&'a Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}
