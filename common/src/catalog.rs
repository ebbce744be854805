use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::debug;

use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::listing::{Listing, ListingId, ListingPatch};

/// Change notification emitted after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    Added(ListingId),
    Updated(ListingId),
    Removed(ListingId),
}

impl CatalogEvent {
    pub fn listing_id(self) -> ListingId {
        match self {
            CatalogEvent::Added(id) | CatalogEvent::Updated(id) | CatalogEvent::Removed(id) => id,
        }
    }
}

/// The ordered set of listings shared by buyer and farmer sessions.
///
/// Insertion order is the default display order. Every successful mutation
/// bumps [`CatalogStore::revision`] and is announced to subscribers.
#[derive(Debug)]
pub struct CatalogStore {
    instance: u64,
    listings: Vec<Listing>,
    revision: u64,
    subscribers: Vec<Sender<CatalogEvent>>,
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            listings: Vec::new(),
            revision: 0,
            subscribers: Vec::new(),
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinguishes this store from every other store in the process.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Build a store from seed listings, rejecting duplicate ids.
    pub fn seeded(listings: impl IntoIterator<Item = Listing>) -> CatalogResult<Self> {
        let mut store = Self::new();
        for listing in listings {
            store.add(listing)?;
        }
        Ok(store)
    }

    pub fn get_all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ListingId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive an event for every mutation from now on.
    pub fn subscribe(&mut self) -> Receiver<CatalogEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Append a listing.
    pub fn add(&mut self, listing: Listing) -> CatalogResult<()> {
        if self.contains(listing.id) {
            return Err(ValidationError::DuplicateId(listing.id).into());
        }
        let id = listing.id;
        self.listings.push(listing);
        debug!(%id, "listing added");
        self.committed(CatalogEvent::Added(id));
        Ok(())
    }

    /// Replace every field of a listing except its id and seller.
    pub fn update(&mut self, id: ListingId, patch: ListingPatch) -> CatalogResult<Listing> {
        let listing = self
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        listing.apply(patch);
        let updated = listing.clone();
        debug!(%id, "listing updated");
        self.committed(CatalogEvent::Updated(id));
        Ok(updated)
    }

    /// Remove a listing. Absent ids are ignored.
    pub fn remove(&mut self, id: ListingId) -> Option<Listing> {
        let Some(pos) = self.listings.iter().position(|l| l.id == id) else {
            debug!(%id, "remove ignored, listing not present");
            return None;
        };
        let removed = self.listings.remove(pos);
        debug!(%id, "listing removed");
        self.committed(CatalogEvent::Removed(id));
        Some(removed)
    }

    fn committed(&mut self, event: CatalogEvent) {
        self.revision += 1;
        // Receivers that were dropped fail to send and are forgotten.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
