//! Buyer and farmer sessions over one shared [`CatalogStore`].
//!
//! Sessions hold per-user state (identity, filter, cached stats) but never
//! their own copy of the listings, so a farmer's change is what the buyer
//! sees on the next read.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::catalog::CatalogStore;
use crate::clock::Clock;
use crate::error::{CatalogResult, MetricsError, PurchaseError};
use crate::identity::UserIdentity;
use crate::lifecycle::{ListingDraft, ListingManager};
use crate::listing::{FarmProfile, Listing, ListingId};
use crate::metrics::{
    days_until_expiry, line_total, CatalogStats, StatsCache, StatsScope, UrgencyTier,
};
use crate::purchase::{PurchaseReceipt, PurchaseRequest, PurchaseService};
use crate::query::{CategoryFilter, ListingFilter, SearchScope};
use crate::quantity::{parse_quantity, QuantityParseError};

/// A listing with its derived figures at a reference instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a> {
    pub listing: &'a Listing,
    pub days_left: i64,
    pub urgency: UrgencyTier,
    pub line_total: Result<f64, QuantityParseError>,
}

impl<'a> ListingView<'a> {
    pub fn at(listing: &'a Listing, reference: DateTime<Utc>) -> Self {
        let days_left = days_until_expiry(listing, reference);
        Self {
            listing,
            days_left,
            urgency: UrgencyTier::from_days(days_left),
            line_total: line_total(listing),
        }
    }
}

pub struct BuyerSession<S> {
    identity: UserIdentity,
    filter: ListingFilter,
    purchases: S,
}

impl<S: PurchaseService> BuyerSession<S> {
    pub fn new(identity: UserIdentity, purchases: S) -> Self {
        Self {
            identity,
            filter: ListingFilter::default().with_scope(SearchScope::ProduceAndFarm),
            purchases,
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn purchases(&self) -> &S {
        &self.purchases
    }

    /// Listings matching the current filter, in catalog order.
    pub fn visible<'a>(&self, store: &'a CatalogStore) -> Vec<&'a Listing> {
        self.filter.apply(store.get_all())
    }

    pub fn views<'a>(&self, store: &'a CatalogStore, reference: DateTime<Utc>) -> Vec<ListingView<'a>> {
        self.visible(store)
            .into_iter()
            .map(|l| ListingView::at(l, reference))
            .collect()
    }

    /// Resolve the listing, check the requested amount, then hand off.
    pub fn purchase(
        &mut self,
        store: &CatalogStore,
        listing_id: ListingId,
        requested: &str,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let listing = store
            .get(listing_id)
            .ok_or(PurchaseError::NotFound(listing_id))?;

        let mut requested = parse_quantity(requested).map_err(|source| {
            PurchaseError::InvalidQuantity {
                requested: requested.to_string(),
                source,
            }
        })?;
        if requested.value <= 0.0 {
            return Err(PurchaseError::NothingRequested);
        }
        let listed = parse_quantity(&listing.amount)
            .map_err(|_| PurchaseError::UnreadableListing(listing_id))?;
        if requested.unit.is_empty() {
            requested.unit = listed.unit.clone();
        } else if !requested.unit.eq_ignore_ascii_case(&listed.unit) {
            return Err(PurchaseError::UnitMismatch {
                requested: requested.unit,
                listed: listed.unit,
            });
        }
        let available = listed.value;
        if requested.value > available {
            warn!(%listing_id, requested = requested.value, available, "purchase exceeds listed amount");
            return Err(PurchaseError::ExceedsAvailable {
                requested: requested.value,
                available,
            });
        }

        let request = PurchaseRequest {
            buyer: self.identity.clone(),
            listing_id,
            requested,
        };
        self.purchases.initiate_purchase(listing, &request)
    }
}

pub struct FarmerSession<C> {
    identity: UserIdentity,
    manager: ListingManager<C>,
    search: ListingFilter,
    stats: StatsCache,
}

impl<C: Clock> FarmerSession<C> {
    pub fn new(identity: UserIdentity, farm: FarmProfile, clock: C) -> Self {
        let scope = StatsScope::Farm(farm.farmer);
        Self {
            identity,
            manager: ListingManager::new(farm, clock),
            search: ListingFilter::default().with_scope(SearchScope::ProduceOnly),
            stats: StatsCache::new(scope),
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn farm(&self) -> &FarmProfile {
        self.manager.seller()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search.search_text = text.into();
    }

    /// This farm's listings that match the produce search, in catalog order.
    pub fn my_listings<'a>(&self, store: &'a CatalogStore) -> Vec<&'a Listing> {
        let farmer = self.farm().farmer;
        self.search
            .apply(store.get_all().iter().filter(|l| l.seller.farmer == farmer))
    }

    /// Count, total value and total units of this farm's listings.
    pub fn stats(&mut self, store: &CatalogStore) -> Result<CatalogStats, MetricsError> {
        self.stats.stats(store)
    }

    pub fn create(&mut self, store: &mut CatalogStore, draft: &ListingDraft) -> CatalogResult<Listing> {
        self.manager.create(store, draft)
    }

    pub fn edit(
        &mut self,
        store: &mut CatalogStore,
        id: ListingId,
        draft: &ListingDraft,
    ) -> CatalogResult<Listing> {
        self.manager.edit(store, id, draft)
    }

    /// The caller has already confirmed the deletion with the user.
    pub fn delete(&mut self, store: &mut CatalogStore, id: ListingId) -> Option<Listing> {
        self.manager.delete(store, id)
    }
}
