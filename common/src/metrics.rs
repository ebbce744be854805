//! Derived figures: expiry countdown, urgency, line totals and catalog aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::clock::{start_of_day, Clock};
use crate::error::MetricsError;
use crate::identity::UserId;
use crate::listing::Listing;
use crate::quantity::{parse_quantity, QuantityParseError};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `reference` until the listing's expiration date (00:00 UTC),
/// rounded up. Negative once the date has passed.
pub fn days_until_expiry(listing: &Listing, reference: DateTime<Utc>) -> i64 {
    let millis = (start_of_day(listing.expiration_date) - reference).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// [`days_until_expiry`] measured from the clock's current instant.
pub fn days_until_expiry_on(listing: &Listing, clock: &impl Clock) -> i64 {
    days_until_expiry(listing, clock.now())
}

/// How soon a listing expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    /// Seven days or fewer, including already expired.
    Urgent,
    /// Eight to fourteen days.
    Soon,
    Normal,
}

impl UrgencyTier {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 7 => UrgencyTier::Urgent,
            d if d <= 14 => UrgencyTier::Soon,
            _ => UrgencyTier::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrgencyTier::Urgent => "urgent",
            UrgencyTier::Soon => "soon",
            UrgencyTier::Normal => "normal",
        }
    }
}

/// Price per unit times the listed quantity.
pub fn line_total(listing: &Listing) -> Result<f64, QuantityParseError> {
    Ok(listing.price_per_unit * parse_quantity(&listing.amount)?.value)
}

/// Count and unrounded sums over a set of listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub count: usize,
    pub total_value: f64,
    pub total_units: f64,
}

/// Fold listings into [`CatalogStats`]. The first unreadable amount aborts the
/// fold rather than being counted as zero.
pub fn aggregate<'a, I>(listings: I) -> Result<CatalogStats, MetricsError>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .try_fold(CatalogStats::default(), |mut stats, listing| {
            let units = parse_quantity(&listing.amount)
                .map_err(|source| MetricsError::UnparsableAmount {
                    id: listing.id,
                    amount: listing.amount.clone(),
                    source,
                })?
                .value;
            stats.count += 1;
            stats.total_units += units;
            stats.total_value += listing.price_per_unit * units;
            Ok(stats)
        })
}

/// Which listings a [`StatsCache`] aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    Catalog,
    Farm(UserId),
}

impl StatsScope {
    pub fn includes(self, listing: &Listing) -> bool {
        match self {
            StatsScope::Catalog => true,
            StatsScope::Farm(farmer) => listing.seller.farmer == farmer,
        }
    }
}

/// Aggregate remembered against the store and revision it was computed at.
#[derive(Debug, Clone)]
pub struct StatsCache {
    scope: StatsScope,
    cached: Option<(StoreVersion, Result<CatalogStats, MetricsError>)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreVersion {
    instance: u64,
    revision: u64,
}

impl StoreVersion {
    fn of(store: &CatalogStore) -> Self {
        Self {
            instance: store.instance(),
            revision: store.revision(),
        }
    }
}

impl StatsCache {
    pub fn new(scope: StatsScope) -> Self {
        Self {
            scope,
            cached: None,
        }
    }

    /// True when `store` is not the store and revision last computed from.
    pub fn is_stale(&self, store: &CatalogStore) -> bool {
        !matches!(&self.cached, Some((version, _)) if *version == StoreVersion::of(store))
    }

    pub fn stats(&mut self, store: &CatalogStore) -> Result<CatalogStats, MetricsError> {
        if self.is_stale(store) {
            let scope = self.scope;
            let fresh = aggregate(store.get_all().iter().filter(|l| scope.includes(l)));
            tracing::debug!(revision = store.revision(), ?scope, "recomputed catalog stats");
            self.cached = Some((StoreVersion::of(store), fresh));
        }
        match &self.cached {
            Some((_, result)) => result.clone(),
            None => Ok(CatalogStats::default()),
        }
    }
}
