//! FARMGATE command-line driver.
//!
//! Loads a catalog (built-in sample data or `--catalog <file>`) into one shared
//! store and runs a single buyer or farmer action against it. Changes live only
//! for the duration of the command.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use farmgate_common::clock::Clock;
use farmgate_common::display::{format_days, format_money, format_stats};
use farmgate_common::identity::UserIdentity;
use farmgate_common::lifecycle::ListingDraft;
use farmgate_common::metrics::aggregate;
use farmgate_common::purchase::NoticePurchaseService;
use farmgate_common::query::CategoryFilter;
use farmgate_common::sample::sample_farmer;
use farmgate_common::session::{BuyerSession, FarmerSession, ListingView};
use farmgate_common::{CatalogStore, ListingId};
use tracing_subscriber::EnvFilter;

use crate::config::{AppClock, Config};

#[derive(Parser)]
#[command(name = "farmgate", about = "Browse and manage produce listings")]
struct Cli {
    /// JSON file with an array of listings to seed the catalog.
    #[arg(long, env = "FARMGATE_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for days-until-expiry. Defaults to today.
    #[arg(long, env = "FARMGATE_TODAY", global = true)]
    today: Option<NaiveDate>,

    /// Buyer display name used for purchases.
    #[arg(long = "as", default_value = "Guest Buyer", global = true)]
    buyer_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List listings matching a search and category.
    Browse {
        #[arg(long, short, default_value = "")]
        search: String,
        /// all, vegetables, fruits, dairy, grains, herbs or other.
        #[arg(long, short, default_value = "all")]
        category: String,
    },
    /// Show one listing in detail.
    Show { id: ListingId },
    /// Count, total value and total units.
    Stats {
        /// Only the sample farm's own listings.
        #[arg(long)]
        farm: bool,
    },
    /// Add a listing as the sample farm.
    Add(DraftArgs),
    /// Edit a listing; omitted fields keep their current value.
    Edit {
        id: ListingId,
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Delete a listing. Requires --yes as confirmation.
    Delete {
        id: ListingId,
        #[arg(long)]
        yes: bool,
    },
    /// Start a purchase of an amount such as "5 kg".
    Purchase { id: ListingId, amount: String },
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    expires: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl DraftArgs {
    /// Overlay the given flags onto `base`.
    fn apply_to(self, mut base: ListingDraft) -> ListingDraft {
        let overlay = |slot: &mut String, value: Option<String>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        overlay(&mut base.produce_name, self.name);
        overlay(&mut base.amount, self.amount);
        overlay(&mut base.price_per_unit, self.price);
        overlay(&mut base.expiration_date, self.expires);
        overlay(&mut base.category, self.category);
        overlay(&mut base.description, self.description);
        base
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        catalog: cli.catalog,
        today: cli.today,
        buyer_name: cli.buyer_name,
    };
    run(&config, cli.command)
}

fn run(config: &Config, command: Command) -> Result<()> {
    let mut store = config.load_catalog()?;
    let clock = config.clock();
    let (farmer_identity, farm) = sample_farmer();
    let mut farmer = FarmerSession::new(farmer_identity, farm, clock.clone());
    let mut buyer = BuyerSession::new(
        UserIdentity::buyer(0, config.buyer_name.clone()),
        NoticePurchaseService::new(),
    );

    match command {
        Command::Browse { search, category } => {
            let category: CategoryFilter = category.parse()?;
            buyer.set_search(search);
            buyer.set_category(category);
            let views = buyer.views(&store, clock.now());
            if views.is_empty() {
                println!("No listings found");
            }
            for view in &views {
                print_row(view);
            }
        }
        Command::Show { id } => {
            let listing = store.get(id).with_context(|| format!("Listing {id} not found"))?;
            print_detail(&ListingView::at(listing, clock.now()));
        }
        Command::Stats { farm } => {
            let stats = if farm {
                farmer.stats(&store)?
            } else {
                aggregate(store.get_all())?
            };
            println!("{}", format_stats(&stats));
        }
        Command::Add(fields) => {
            let draft = fields.apply_to(ListingDraft::default());
            let listing = farmer.create(&mut store, &draft)?;
            println!("Created listing {}", listing.id);
            print_farm_summary(&mut farmer, &store, &clock)?;
        }
        Command::Edit { id, fields } => {
            let current = store.get(id).with_context(|| format!("Listing {id} not found"))?;
            let draft = fields.apply_to(ListingDraft::from_listing(current));
            let listing = farmer.edit(&mut store, id, &draft)?;
            println!("Updated listing {}", listing.id);
            print_farm_summary(&mut farmer, &store, &clock)?;
        }
        Command::Delete { id, yes } => {
            if !yes {
                bail!("Refusing to delete listing {id} without --yes");
            }
            match farmer.delete(&mut store, id) {
                Some(removed) => println!("Deleted {} ({})", removed.produce_name, removed.id),
                None => println!("Listing {id} was already gone"),
            }
            print_farm_summary(&mut farmer, &store, &clock)?;
        }
        Command::Purchase { id, amount } => {
            let receipt = buyer.purchase(&store, id, &amount)?;
            println!("{}", receipt.notice);
        }
    }
    Ok(())
}

fn print_row(view: &ListingView<'_>) {
    let l = view.listing;
    let verified = if l.seller.verified { " ✓" } else { "" };
    println!(
        "{:>4} {} {:<16} {}{} · {} · {} ({}) · {} · {}/unit",
        l.id.0,
        l.category.glyph(),
        l.produce_name,
        l.seller.farm_name,
        verified,
        l.amount,
        format_days(view.days_left),
        view.urgency.label(),
        l.seller.distance,
        format_money(l.price_per_unit),
    );
}

fn print_detail(view: &ListingView<'_>) {
    let l = view.listing;
    println!("{} (#{})", l.produce_name, l.id);
    let verified = if l.seller.verified { " (verified)" } else { "" };
    println!("  Farm:        {}{verified}", l.seller.farm_name);
    println!("  Location:    {} · {}", l.seller.location, l.seller.distance);
    println!("  Category:    {}", l.category);
    println!("  Available:   {}", l.amount);
    println!("  Price:       {} per unit", format_money(l.price_per_unit));
    println!(
        "  Expires:     {} ({}, {})",
        l.expiration_date,
        format_days(view.days_left),
        view.urgency.label()
    );
    match &view.line_total {
        Ok(total) => println!("  Total:       {}", format_money(*total)),
        Err(e) => println!("  Total:       unavailable ({e})"),
    }
    if let Some(description) = &l.description {
        println!("  About:       {description}");
    }
}

fn print_farm_summary(
    farmer: &mut FarmerSession<AppClock>,
    store: &CatalogStore,
    clock: &AppClock,
) -> Result<()> {
    println!("{}:", farmer.farm().farm_name);
    for listing in farmer.my_listings(store) {
        print_row(&ListingView::at(listing, clock.now()));
    }
    let stats = farmer.stats(store)?;
    println!("{}", format_stats(&stats));
    Ok(())
}
