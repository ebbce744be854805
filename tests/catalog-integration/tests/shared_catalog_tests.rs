use farmgate_catalog_integration::harness::TestHarness;
use farmgate_catalog_integration::{jan, make_draft};
use farmgate_common::display::format_stats;
use farmgate_common::lifecycle::ListingDraft;
use farmgate_common::listing::{Category, ListingId};
use farmgate_common::metrics::{aggregate, UrgencyTier};
use farmgate_common::query::CategoryFilter;
use farmgate_common::{CatalogEvent, CatalogError, PurchaseError, ValidationError};

/// A listing a farmer creates is what buyers browse next.
#[test]
fn farmer_listing_visible_to_buyers() {
    let mut h = TestHarness::setup();

    let corn = h
        .gary
        .add_listing(&mut h.store, "Sweet Corn", Category::Vegetables, "1.50");

    let alice_sees = h.alice.session.visible(&h.store);
    let bob_sees = h.bob.session.visible(&h.store);
    assert_eq!(alice_sees, vec![&corn]);
    assert_eq!(bob_sees, vec![&corn]);
}

/// Both buyers are notified of every change, in order.
#[test]
fn buyers_receive_change_events() {
    let mut h = TestHarness::setup();

    let a = h.gary.add_listing(&mut h.store, "Raw Milk", Category::Dairy, "2");
    let b = h.emma.add_listing(&mut h.store, "Pears", Category::Fruits, "3");
    let mut edit = ListingDraft::from_listing(&a);
    edit.amount = "8 L".into();
    h.gary.session.edit(&mut h.store, a.id, &edit).unwrap();
    h.emma.session.delete(&mut h.store, b.id);

    let expected = vec![
        CatalogEvent::Added(a.id),
        CatalogEvent::Added(b.id),
        CatalogEvent::Updated(a.id),
        CatalogEvent::Removed(b.id),
    ];
    assert_eq!(h.alice.drain_events(), expected);
    assert_eq!(h.bob.drain_events(), expected);
    assert!(h.alice.drain_events().is_empty());
}

/// Two farms share the store but only see and count their own listings.
#[test]
fn farms_are_isolated_within_shared_store() {
    let mut h = TestHarness::setup();

    h.gary.add_listing(&mut h.store, "Kale", Category::Vegetables, "2");
    h.gary.add_listing(&mut h.store, "Chard", Category::Vegetables, "3");
    h.emma.add_listing(&mut h.store, "Plums", Category::Fruits, "4");

    assert_eq!(h.gary.session.my_listings(&h.store).len(), 2);
    assert_eq!(h.emma.session.my_listings(&h.store).len(), 1);

    let gary = h.gary.session.stats(&h.store).unwrap();
    assert_eq!(gary.count, 2);
    assert_eq!(gary.total_value, 50.0);
    assert_eq!(gary.total_units, 20.0);

    let all = aggregate(h.store.get_all()).unwrap();
    let emma = h.emma.session.stats(&h.store).unwrap();
    assert_eq!(all.total_value, gary.total_value + emma.total_value);
}

/// Created ids come from the clock and never collide, even at the same instant.
#[test]
fn ids_unique_across_farmers_at_same_instant() {
    let mut h = TestHarness::setup();

    let a = h.gary.add_listing(&mut h.store, "Leeks", Category::Vegetables, "1");
    let b = h.emma.add_listing(&mut h.store, "Figs", Category::Fruits, "1");
    assert_eq!(a.id, ListingId(jan(10).timestamp_millis() as u64));
    assert_ne!(a.id, b.id);

    h.clock.advance_millis(5_000);
    let c = h.gary.add_listing(&mut h.store, "Onions", Category::Vegetables, "1");
    assert_eq!(c.id.0, a.id.0 + 5_000);
}

/// Create, edit, delete round trip observed through get_all.
#[test]
fn lifecycle_round_trip() {
    let mut h = TestHarness::setup();

    let draft = make_draft("Honeydew", Category::Fruits, "6", "12 kg");
    let created = h.emma.submit(&mut h.store, &draft);
    assert_eq!(h.store.get_all().len(), 1);
    let stored = &h.store.get_all()[0];
    assert_eq!(stored, &created);
    assert_eq!(ListingDraft::from_listing(stored).produce_name, draft.produce_name);

    let mut changed = draft.clone();
    changed.produce_name = "Cantaloupe".into();
    changed.price_per_unit = "5.5".into();
    h.emma.session.edit(&mut h.store, created.id, &changed).unwrap();
    let stored = h.store.get(created.id).unwrap();
    assert_eq!(stored.produce_name, "Cantaloupe");
    assert_eq!(stored.price_per_unit, 5.5);

    h.emma.session.delete(&mut h.store, created.id);
    assert!(h.store.get_all().iter().all(|l| l.id != created.id));
}

/// Invalid forms leave the shared store and every subscriber untouched.
#[test]
fn invalid_submission_changes_nothing() {
    let mut h = TestHarness::setup();
    let mut draft = make_draft("Garlic", Category::Herbs, "abc", "3 kg");

    assert_eq!(
        h.gary.session.create(&mut h.store, &draft),
        Err(CatalogError::Validation(ValidationError::InvalidPrice("abc".into())))
    );
    draft.price_per_unit = "2".into();
    draft.amount = "plenty".into();
    assert!(h.gary.session.create(&mut h.store, &draft).is_err());

    assert!(h.store.is_empty());
    assert!(h.alice.drain_events().is_empty());
}

/// The worked example: tomatoes searched, totalled and dated.
#[test]
fn sample_tomato_scenario() {
    let mut h = TestHarness::seeded();

    h.alice.session.set_search("tomato");
    let views = h.alice.session.views(&h.store, jan(15));
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].listing.produce_name, "Fresh Tomatoes");
    assert_eq!(views[0].line_total, Ok(125.0));
    assert_eq!(views[0].days_left, 5);
    assert_eq!(views[0].urgency, UrgencyTier::Urgent);

    h.alice.session.set_search("apple");
    h.alice.session.set_category(CategoryFilter::Only(Category::Vegetables));
    assert!(h.alice.session.visible(&h.store).is_empty());

    h.alice.session.set_search("");
    h.alice.session.set_category(CategoryFilter::All);
    assert_eq!(h.alice.session.visible(&h.store).len(), h.store.len());
}

/// Purchases are handed off without touching the listing.
#[test]
fn purchase_is_a_notice_only() {
    let mut h = TestHarness::seeded();

    let receipt = h
        .bob
        .session
        .purchase(&h.store, ListingId(4), "20 L")
        .unwrap();
    assert_eq!(
        receipt.notice,
        "Purchase initiated for 20 L of Fresh Milk from Dairy Delight"
    );
    assert_eq!(h.store.get(ListingId(4)).unwrap().amount, "200 L");
    assert!(h.bob.drain_events().is_empty());

    // a farm deleting the listing makes later purchases fail
    h.gary.session.delete(&mut h.store, ListingId(4));
    assert_eq!(
        h.bob.session.purchase(&h.store, ListingId(4), "1 L"),
        Err(PurchaseError::NotFound(ListingId(4)))
    );
}

/// Farm stats follow edits without manual invalidation.
#[test]
fn farm_stats_track_mutations() {
    let mut h = TestHarness::setup();
    let beans = h
        .gary
        .add_listing(&mut h.store, "Beans", Category::Vegetables, "2");
    assert_eq!(
        format_stats(&h.gary.session.stats(&h.store).unwrap()),
        "1 listing · $20.00 total value · 10 total units"
    );

    let mut edit = ListingDraft::from_listing(&beans);
    edit.amount = "25 kg".into();
    h.gary.session.edit(&mut h.store, beans.id, &edit).unwrap();
    assert_eq!(
        format_stats(&h.gary.session.stats(&h.store).unwrap()),
        "1 listing · $50.00 total value · 25 total units"
    );
}

/// Seeded catalogs survive a JSON round trip with order intact.
#[test]
fn seeded_catalog_json_round_trip() {
    let h = TestHarness::seeded();
    let json = serde_json::to_string(h.store.get_all()).unwrap();
    let back: Vec<farmgate_common::Listing> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), h.store.get_all());
}
