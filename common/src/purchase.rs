use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PurchaseError;
use crate::identity::{UserId, UserIdentity};
use crate::listing::{Listing, ListingId};
use crate::quantity::Quantity;

/// What a buyer asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub buyer: UserIdentity,
    pub listing_id: ListingId,
    pub requested: Quantity,
}

/// Acknowledgement that a purchase was handed off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub listing_id: ListingId,
    pub buyer: UserId,
    pub requested: Quantity,
    pub notice: String,
}

/// Checkout capability injected into the buyer session.
///
/// Called only after the listing has been resolved and the requested quantity
/// checked against what is listed.
pub trait PurchaseService {
    fn initiate_purchase(
        &mut self,
        listing: &Listing,
        request: &PurchaseRequest,
    ) -> Result<PurchaseReceipt, PurchaseError>;
}

/// Records a notice for each purchase and nothing else. No inventory changes.
#[derive(Debug, Clone, Default)]
pub struct NoticePurchaseService {
    notices: Vec<String>,
}

impl NoticePurchaseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl PurchaseService for NoticePurchaseService {
    fn initiate_purchase(
        &mut self,
        listing: &Listing,
        request: &PurchaseRequest,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let notice = format!(
            "Purchase initiated for {} of {} from {}",
            request.requested, listing.produce_name, listing.seller.farm_name
        );
        info!(
            listing = %listing.id,
            buyer = %request.buyer.id,
            "{notice}"
        );
        self.notices.push(notice.clone());
        Ok(PurchaseReceipt {
            listing_id: listing.id,
            buyer: request.buyer.id,
            requested: request.requested.clone(),
            notice,
        })
    }
}
