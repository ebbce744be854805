use std::sync::mpsc::Receiver;

use farmgate_common::clock::FixedClock;
use farmgate_common::identity::UserIdentity;
use farmgate_common::lifecycle::ListingDraft;
use farmgate_common::listing::{Category, Listing};
use farmgate_common::purchase::NoticePurchaseService;
use farmgate_common::sample::sample_listings;
use farmgate_common::session::{BuyerSession, FarmerSession};
use farmgate_common::{CatalogEvent, CatalogStore};

use crate::{init_tracing, jan, make_draft, make_farm};

/// A farmer participant in the test harness.
pub struct Farmer {
    pub name: String,
    pub session: FarmerSession<FixedClock>,
}

impl Farmer {
    /// Create a listing from a valid form and return it.
    pub fn add_listing(
        &mut self,
        store: &mut CatalogStore,
        name: &str,
        category: Category,
        price: &str,
    ) -> Listing {
        self.submit(store, &make_draft(name, category, price, "10 kg"))
    }

    pub fn submit(&mut self, store: &mut CatalogStore, draft: &ListingDraft) -> Listing {
        self.session
            .create(store, draft)
            .unwrap_or_else(|e| panic!("{} failed to create {:?}: {e}", self.name, draft.produce_name))
    }
}

/// A buyer participant, subscribed to catalog changes.
pub struct Buyer {
    pub name: String,
    pub session: BuyerSession<NoticePurchaseService>,
    pub events: Receiver<CatalogEvent>,
}

impl Buyer {
    /// Every event delivered since the last drain.
    pub fn drain_events(&self) -> Vec<CatalogEvent> {
        self.events.try_iter().collect()
    }
}

/// One shared store with two farmers and two buyers on a pinned clock.
pub struct TestHarness {
    pub store: CatalogStore,
    pub clock: FixedClock,
    pub gary: Farmer,
    pub emma: Farmer,
    pub alice: Buyer,
    pub bob: Buyer,
}

impl TestHarness {
    /// Empty catalog, clock at 2024-01-10.
    pub fn setup() -> Self {
        Self::with_store(CatalogStore::new())
    }

    /// Built-in sample catalog, clock at 2024-01-10.
    pub fn seeded() -> Self {
        Self::with_store(CatalogStore::seeded(sample_listings()).expect("sample ids are unique"))
    }

    fn with_store(mut store: CatalogStore) -> Self {
        init_tracing();
        let clock = FixedClock::new(jan(10));

        let farmer = |id: u64, name: &str| Farmer {
            name: name.to_string(),
            session: FarmerSession::new(
                UserIdentity::farmer(id, name),
                make_farm(id, name),
                clock.clone(),
            ),
        };
        let gary = farmer(101, "Gary's Acres");
        let emma = farmer(102, "Emma's Orchard");

        let mut buyer = |id: u64, name: &str| Buyer {
            name: name.to_string(),
            session: BuyerSession::new(UserIdentity::buyer(id, name), NoticePurchaseService::new()),
            events: store.subscribe(),
        };
        let alice = buyer(201, "Alice");
        let bob = buyer(202, "Bob");
        tracing::info!(listings = store.len(), "test harness ready");

        Self {
            store,
            clock,
            gary,
            emma,
            alice,
            bob,
        }
    }
}
