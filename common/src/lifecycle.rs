use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::clock::Clock;
use crate::error::{CatalogResult, ValidationError};
use crate::listing::{Category, FarmProfile, Listing, ListingId, ListingPatch};
use crate::quantity::parse_quantity;

/// Raw listing form values as typed by the farmer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub produce_name: String,
    pub amount: String,
    pub price_per_unit: String,
    pub expiration_date: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl ListingDraft {
    /// Prefill the form from an existing listing.
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            produce_name: listing.produce_name.clone(),
            amount: listing.amount.clone(),
            price_per_unit: listing.price_per_unit.to_string(),
            expiration_date: listing.expiration_date.format("%Y-%m-%d").to_string(),
            category: listing.category.to_string(),
            description: listing.description.clone().unwrap_or_default(),
        }
    }

    /// Check every field and convert to typed values.
    pub fn validate(&self) -> Result<ListingPatch, ValidationError> {
        let produce_name = required(&self.produce_name, "produce name")?;

        let amount = required(&self.amount, "amount")?;
        let quantity = parse_quantity(amount).map_err(|source| ValidationError::InvalidAmount {
            amount: amount.to_string(),
            source,
        })?;
        if quantity.value < 0.0 {
            return Err(ValidationError::NegativeAmount(amount.to_string()));
        }

        let price_text = required(&self.price_per_unit, "price")?;
        let price_per_unit = price_text
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ValidationError::InvalidPrice(price_text.to_string()))?;
        if price_per_unit < 0.0 {
            return Err(ValidationError::NegativePrice(price_per_unit));
        }

        let category: Category = required(&self.category, "category")?.parse()?;

        let date_text = required(&self.expiration_date, "expiration date")?;
        let expiration_date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_text.to_string()))?;

        let description = self.description.trim();

        Ok(ListingPatch {
            produce_name: produce_name.to_string(),
            amount: amount.to_string(),
            price_per_unit,
            expiration_date,
            category,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Validated create, edit and delete of one farm's listings.
#[derive(Debug, Clone)]
pub struct ListingManager<C> {
    seller: FarmProfile,
    clock: C,
    last_id: Option<u64>,
}

impl<C: Clock> ListingManager<C> {
    pub fn new(seller: FarmProfile, clock: C) -> Self {
        Self {
            seller,
            clock,
            last_id: None,
        }
    }

    pub fn seller(&self) -> &FarmProfile {
        &self.seller
    }

    /// Validate the draft, assign a fresh id and append the listing.
    pub fn create(&mut self, store: &mut CatalogStore, draft: &ListingDraft) -> CatalogResult<Listing> {
        let patch = draft.validate()?;
        let id = self.next_id(store);
        let listing = Listing {
            id,
            produce_name: patch.produce_name,
            amount: patch.amount,
            price_per_unit: patch.price_per_unit,
            expiration_date: patch.expiration_date,
            category: patch.category,
            description: patch.description,
            seller: self.seller.clone(),
        };
        store.add(listing.clone())?;
        info!(%id, produce = %listing.produce_name, farm = %self.seller.farm_name, "listing created");
        Ok(listing)
    }

    /// Validate the draft and replace every field of `id` except identity and seller.
    pub fn edit(
        &mut self,
        store: &mut CatalogStore,
        id: ListingId,
        draft: &ListingDraft,
    ) -> CatalogResult<Listing> {
        let patch = draft.validate()?;
        let listing = store.update(id, patch)?;
        info!(%id, "listing edited");
        Ok(listing)
    }

    /// Remove a listing the user has already confirmed deleting.
    /// Unknown ids are ignored.
    pub fn delete(&mut self, store: &mut CatalogStore, id: ListingId) -> Option<Listing> {
        let removed = store.remove(id);
        if removed.is_some() {
            info!(%id, "listing deleted");
        }
        removed
    }

    /// Creation timestamp in milliseconds, bumped past ids already issued or stored.
    fn next_id(&mut self, store: &CatalogStore) -> ListingId {
        let now = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0);
        let mut candidate = self.last_id.map_or(now, |last| now.max(last + 1));
        while store.contains(ListingId(candidate)) {
            candidate += 1;
        }
        if candidate != now {
            debug!(candidate, now, "listing id bumped past clock");
        }
        self.last_id = Some(candidate);
        ListingId(candidate)
    }
}
