//! `lofts`: inspect booking calendars and listings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Busy intervals of an exported iCal feed (stdin → JSON on stdout)
//! curl -s "$ICAL_URL" | lofts parse
//!
//! # Blocked and selectable runs for a month
//! lofts calendar -i listing.ics --from 2024-05-01 --to 2024-05-31 --today 2024-05-03
//!
//! # Replay check-in / check-out clicks through the resolver
//! lofts select -i listing.ics --today 2024-05-01 2024-05-06 2024-05-09
//!
//! # Reservation link for a committed stay
//! lofts link --base https://www.airbnb.com.br/rooms/1553101057890730646 \
//!     --check-in 2024-05-06 --check-out 2024-05-09 --adults 2
//!
//! # Filtered page of the property catalog
//! lofts listings --catalog lofts.json --kind loft --bedrooms 2 --max-price 400
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use loft_availability::{
    parse_day, parse_feed_with, reservation_url, AvailabilityResolver, BlockedDateSet, DayRun,
    DtEndPolicy, FeedOptions, GuestCount, ReseedPolicy, SelectionRange, SelectionResult, StayQuote,
    DEFAULT_MAX_GUESTS,
};
use loft_catalog::{
    paginate, BedroomFilter, JsonFileRepository, ListingFilter, PropertyKind, PropertyRepository,
    DEFAULT_PAGE_SIZE,
};

#[derive(Parser)]
#[command(
    name = "lofts",
    version,
    about = "Booking-calendar and listing tools for short-term rental lofts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an iCal feed into busy intervals (JSON)
    Parse {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Show blocked and selectable day runs within a window (JSON)
    Calendar {
        #[command(flatten)]
        feed: FeedArgs,
        /// First day of the window (YYYY-MM-DD)
        #[arg(long, value_parser = day_arg)]
        from: NaiveDate,
        /// Last day of the window, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = day_arg)]
        to: NaiveDate,
        /// Reference day for past-date exclusion (defaults to the local date)
        #[arg(long, value_parser = day_arg)]
        today: Option<NaiveDate>,
    },
    /// Replay date clicks through the selection state machine (JSON)
    Select {
        #[command(flatten)]
        feed: FeedArgs,
        /// Reference day for past-date exclusion (defaults to the local date)
        #[arg(long, value_parser = day_arg)]
        today: Option<NaiveDate>,
        /// On a rejected range keep the previous start instead of the clicked day
        #[arg(long)]
        keep_start: bool,
        /// Nightly price, to quote the stay once the range is complete
        #[arg(long)]
        nightly_price: Option<u64>,
        /// Clicked days, in order
        #[arg(value_parser = day_arg, required = true)]
        days: Vec<NaiveDate>,
    },
    /// Build the booking-provider URL for a stay
    Link {
        /// Reservation page of the listing
        #[arg(long)]
        base: String,
        #[arg(long, value_parser = day_arg, requires = "check_out")]
        check_in: Option<NaiveDate>,
        #[arg(long, value_parser = day_arg, requires = "check_in")]
        check_out: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long, default_value_t = 0)]
        infants: u32,
        /// Capacity for adults + children
        #[arg(long, default_value_t = DEFAULT_MAX_GUESTS)]
        max_guests: u32,
    },
    /// Filter and paginate a JSON property catalog (JSON)
    Listings {
        /// Catalog file (JSON array of properties)
        #[arg(long)]
        catalog: String,
        /// Case-insensitive text matched against title, neighborhood and street
        #[arg(long)]
        search: Option<String>,
        /// loft, apartment, studio or house
        #[arg(long)]
        kind: Option<PropertyKind>,
        /// Exact count, "N+" for at least N, or "any"
        #[arg(long)]
        bedrooms: Option<BedroomFilter>,
        #[arg(long)]
        min_price: Option<u64>,
        #[arg(long)]
        max_price: Option<u64>,
        #[arg(long)]
        neighborhood: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        per_page: usize,
    },
}

#[derive(Args)]
struct FeedArgs {
    /// iCal file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Treat DTEND as the last occupied day instead of the check-out day
    #[arg(long)]
    inclusive_end: bool,
    /// Let cancelled and transparent events block days too
    #[arg(long)]
    keep_all: bool,
}

impl FeedArgs {
    fn options(&self) -> FeedOptions {
        FeedOptions {
            dtend: if self.inclusive_end {
                DtEndPolicy::Inclusive
            } else {
                DtEndPolicy::Exclusive
            },
            keep_cancelled: self.keep_all,
            keep_transparent: self.keep_all,
        }
    }

    fn load(&self) -> Result<Vec<loft_availability::BusyInterval>> {
        let raw = read_input(self.input.as_deref())?;
        Ok(parse_feed_with(&raw, &self.options()))
    }
}

#[derive(Serialize)]
struct CalendarReport {
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
    blocked: Vec<DayRun>,
    selectable: Vec<DayRun>,
}

#[derive(Serialize)]
struct SelectReport {
    today: NaiveDate,
    results: Vec<SelectionResult>,
    range: SelectionRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<StayQuote>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { feed } => {
            let intervals = feed.load()?;
            print_json(&intervals)?;
        }
        Commands::Calendar {
            feed,
            from,
            to,
            today,
        } => {
            if from > to {
                bail!("--from {} is after --to {}", from, to);
            }
            let today = today.unwrap_or_else(local_today);
            let blocked_days = BlockedDateSet::from_intervals_within(&feed.load()?, from, to);

            let blocked = blocked_days.blocked_runs();
            // Past days are never selectable; a window entirely in the past is empty.
            let selectable = blocked_days.free_runs(from.max(today), to);

            print_json(&CalendarReport {
                from,
                to,
                today,
                blocked,
                selectable,
            })?;
        }
        Commands::Select {
            feed,
            today,
            keep_start,
            nightly_price,
            days,
        } => {
            let today = today.unwrap_or_else(local_today);
            let policy = if keep_start {
                ReseedPolicy::KeepStart
            } else {
                ReseedPolicy::ClickedDay
            };
            let mut resolver = AvailabilityResolver::with_policy(policy);
            resolver.load_blocked(&feed.load()?);

            let results = days
                .into_iter()
                .map(|day| resolver.select_day(day, today))
                .collect();
            let range = resolver.current_range();
            let quote = nightly_price
                .filter(|_| range.is_complete())
                .map(|price| StayQuote::new(&range, price));

            print_json(&SelectReport {
                today,
                results,
                range,
                quote,
            })?;
        }
        Commands::Link {
            base,
            check_in,
            check_out,
            adults,
            children,
            infants,
            max_guests,
        } => {
            if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
                if check_in >= check_out {
                    bail!("--check-in {} must be before --check-out {}", check_in, check_out);
                }
            }
            let range = SelectionRange {
                start: check_in,
                end: check_out,
            };
            let guests = GuestCount::new(adults, children, infants, max_guests)
                .context("Invalid guest count")?;
            let url = reservation_url(&base, &range, &guests)
                .context("Failed to build reservation URL")?;
            println!("{}", url);
        }
        Commands::Listings {
            catalog,
            search,
            kind,
            bedrooms,
            min_price,
            max_price,
            neighborhood,
            page,
            per_page,
        } => {
            let repo = JsonFileRepository::open(&catalog)
                .with_context(|| format!("Failed to open catalog: {}", catalog))?;

            let mut builder = ListingFilter::builder();
            if let Some(search) = search {
                builder = builder.search(search);
            }
            if let Some(kind) = kind {
                builder = builder.kind(kind);
            }
            if let Some(bedrooms) = bedrooms {
                builder = builder.bedrooms(bedrooms);
            }
            if let Some(min) = min_price {
                builder = builder.min_price(min);
            }
            if let Some(max) = max_price {
                builder = builder.max_price(max);
            }
            if let Some(neighborhood) = neighborhood {
                builder = builder.neighborhood(neighborhood);
            }
            let filter = builder.build().context("Invalid listing filter")?;

            let matching = filter.apply(&repo.list()?);
            debug!(
                catalog = %repo.path().display(),
                matching = matching.len(),
                "filtered catalog"
            );
            let page = paginate(&matching, page, per_page).context("Invalid page")?;
            print_json(&page)?;
        }
    }

    Ok(())
}

fn day_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_day(s).map_err(|e| e.to_string())
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
