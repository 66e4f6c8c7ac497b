//! Card Kingdom buylist reports for MTGJSON sets.
//!
//! Given a set code, fetches the set file and the daily price snapshot from
//! the MTGJSON CDN, joins them by card uuid, keeps the most recent Card
//! Kingdom buylist price for every card and finish, and renders the result
//! as CSV or JSON.
//!
//! # Quick start
//!
//! ```no_run
//! use ckbuylist::{BuylistReportBuilder, Config, MtgjsonClient, OutputFormat};
//!
//! # async fn example() -> ckbuylist::Result<()> {
//! let client = MtgjsonClient::new(Config::default())?;
//! let builder = BuylistReportBuilder::new(client);
//!
//! let report = builder.build(Some("MH3"), OutputFormat::Csv, Some("foil")).await?;
//! println!("{}", report.body);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod server;

pub use builder::{collect_rows, BuylistReportBuilder, RenderedReport};
pub use cache::PriceCache;
pub use client::{DatasetMeta, MtgjsonClient};
pub use config::Config;
pub use error::{BuylistError, Result};
pub use render::OutputFormat;
