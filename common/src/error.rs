use crate::listing::ListingId;
use crate::quantity::QuantityParseError;

/// A listing draft or catalog insert was rejected. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("amount {amount:?} is not a quantity: {source}")]
    InvalidAmount {
        amount: String,
        #[source]
        source: QuantityParseError,
    },

    #[error("amount {0:?} must not be negative")]
    NegativeAmount(String),

    #[error("price {0:?} is not a number")]
    InvalidPrice(String),

    #[error("price {0} must not be negative")]
    NegativePrice(f64),

    #[error("expiration date {0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("listing {0} already exists")]
    DuplicateId(ListingId),
}

/// Errors from catalog reads and mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("listing {0} not found")]
    NotFound(ListingId),
}

/// Convenience type alias.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Aggregates refuse to fold an amount they cannot read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("listing {id} has an unreadable amount {amount:?}: {source}")]
    UnparsableAmount {
        id: ListingId,
        amount: String,
        #[source]
        source: QuantityParseError,
    },
}

/// Errors surfaced by the purchase hand-off.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error("listing {0} not found")]
    NotFound(ListingId),

    #[error("requested amount {requested:?} is not a quantity: {source}")]
    InvalidQuantity {
        requested: String,
        #[source]
        source: QuantityParseError,
    },

    #[error("listing {0} has an unreadable amount and cannot be bought")]
    UnreadableListing(ListingId),

    #[error("requested amount must be greater than zero")]
    NothingRequested,

    #[error("requested unit {requested:?} does not match listed unit {listed:?}")]
    UnitMismatch { requested: String, listed: String },

    #[error("requested {requested} but only {available} listed")]
    ExceedsAvailable { requested: f64, available: f64 },

    #[error("purchase rejected: {0}")]
    Rejected(String),
}
