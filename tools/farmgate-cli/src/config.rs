use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use farmgate_common::clock::{start_of_day, Clock, FixedClock, SystemClock};
use farmgate_common::sample::sample_listings;
use farmgate_common::{CatalogStore, Listing};
use tracing::info;

/// Settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON array of listings to seed from. Built-in sample data when absent.
    pub catalog: Option<PathBuf>,
    /// Reference date for expiry math. Wall clock when absent.
    pub today: Option<NaiveDate>,
    pub buyer_name: String,
}

impl Config {
    pub fn load_catalog(&self) -> Result<CatalogStore> {
        let listings = match &self.catalog {
            Some(path) => read_listings(path)?,
            None => sample_listings(),
        };
        let store = CatalogStore::seeded(listings).context("Catalog contains duplicate listing ids")?;
        info!(listings = store.len(), "catalog loaded");
        Ok(store)
    }

    pub fn clock(&self) -> AppClock {
        match self.today {
            Some(date) => AppClock::Fixed(FixedClock::new(start_of_day(date))),
            None => AppClock::System(SystemClock),
        }
    }
}

/// Either the wall clock or the date pinned with `--today`.
#[derive(Debug, Clone)]
pub enum AppClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for AppClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            AppClock::System(c) => c.now(),
            AppClock::Fixed(c) => c.now(),
        }
    }
}

pub fn read_listings(path: &Path) -> Result<Vec<Listing>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog from {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse catalog from {:?}", path))
}
