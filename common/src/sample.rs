//! Built-in catalog used when no catalog file is supplied.

use chrono::NaiveDate;

use crate::identity::{UserId, UserIdentity};
use crate::listing::{Category, FarmProfile, Listing, ListingId};

fn farm(id: u64, name: &str, location: &str, distance: &str, verified: bool) -> FarmProfile {
    FarmProfile {
        farmer: UserId(id),
        farm_name: name.into(),
        location: location.into(),
        distance: distance.into(),
        verified,
    }
}

/// The farms behind the sample listings, in listing order.
pub fn sample_farms() -> Vec<FarmProfile> {
    vec![
        farm(1, "Green Valley Farm", "Rural District", "5.2 km", true),
        farm(2, "Sunshine Orchard", "Mountain View", "8.5 km", true),
        farm(3, "Fresh Fields", "Farm Road", "12.3 km", false),
        farm(4, "Dairy Delight", "Countryside", "15.0 km", true),
        farm(5, "Grain Masters", "Plains Area", "20.5 km", true),
        farm(6, "Herb Garden", "Garden District", "6.8 km", false),
    ]
}

/// Identity of the farm that owns the first sample listing.
pub fn sample_farmer() -> (UserIdentity, FarmProfile) {
    let profile = farm(1, "Green Valley Farm", "Rural District", "5.2 km", true);
    (UserIdentity::farmer(1, profile.farm_name.clone()), profile)
}

type SampleRow = (&'static str, &'static str, f64, NaiveDate, Category, Option<&'static str>);

/// Evaluated in a const, so a bad date fails the build.
const fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid sample date"),
    }
}

const SAMPLE_ROWS: [SampleRow; 6] = [
    (
        "Fresh Tomatoes",
        "50 kg",
        2.50,
        ymd(2024, 1, 20),
        Category::Vegetables,
        Some("Freshly harvested organic tomatoes"),
    ),
    (
        "Organic Apples",
        "100 kg",
        3.00,
        ymd(2024, 1, 25),
        Category::Fruits,
        Some("Premium quality organic apples"),
    ),
    ("Carrots", "75 kg", 1.80, ymd(2024, 1, 18), Category::Vegetables, None),
    ("Fresh Milk", "200 L", 4.50, ymd(2024, 1, 15), Category::Dairy, None),
    ("Wheat", "500 kg", 1.20, ymd(2024, 2, 10), Category::Grains, None),
    ("Fresh Basil", "10 kg", 5.00, ymd(2024, 1, 16), Category::Herbs, None),
];

pub fn sample_listings() -> Vec<Listing> {
    SAMPLE_ROWS
        .into_iter()
        .zip(sample_farms())
        .zip(1u64..)
        .map(|((row, seller), id)| {
            let (produce_name, amount, price, expiration_date, category, description) = row;
            Listing {
                id: ListingId(id),
                produce_name: produce_name.into(),
                amount: amount.into(),
                price_per_unit: price,
                expiration_date,
                category,
                description: description.map(Into::into),
                seller,
            }
        })
        .collect()
}
