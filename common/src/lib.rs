pub mod catalog;
pub mod clock;
pub mod display;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod listing;
pub mod metrics;
pub mod purchase;
pub mod quantity;
pub mod query;
pub mod sample;
pub mod session;

pub use catalog::{CatalogEvent, CatalogStore};
pub use error::{CatalogError, MetricsError, PurchaseError, ValidationError};
pub use listing::{Category, FarmProfile, Listing, ListingId};
