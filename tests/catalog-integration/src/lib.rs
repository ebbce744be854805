use chrono::{DateTime, NaiveDate, Utc};

use farmgate_common::clock::start_of_day;
use farmgate_common::identity::UserId;
use farmgate_common::lifecycle::ListingDraft;
use farmgate_common::listing::{Category, FarmProfile};

pub mod harness;

/// Midnight UTC on the given day of January 2024.
pub fn jan(day: u32) -> DateTime<Utc> {
    start_of_day(NaiveDate::from_ymd_opt(2024, 1, day).expect("valid January date"))
}

/// A farm profile for a test participant.
pub fn make_farm(id: u64, name: &str) -> FarmProfile {
    FarmProfile {
        farmer: UserId(id),
        farm_name: name.to_string(),
        location: format!("{name} Road"),
        distance: format!("{id}.0 km"),
        verified: id % 2 == 0,
    }
}

/// A complete, valid listing form.
pub fn make_draft(name: &str, category: Category, price: &str, amount: &str) -> ListingDraft {
    ListingDraft {
        produce_name: name.to_string(),
        amount: amount.to_string(),
        price_per_unit: price.to_string(),
        expiration_date: "2024-01-20".into(),
        category: category.to_string(),
        description: format!("Fresh {name}"),
    }
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
