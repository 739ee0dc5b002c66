//! Async client for the sheetdb document service.
//!
//! This crate owns everything that touches the network or the clock:
//! fetching documents through a [`DocumentProvider`], caching the latest
//! outcome per document name in a [`SheetCache`], and optionally
//! re-fetching on an interval through the refresh controller.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── SheetDb (query API + refresh controller)
//!           ├── SheetCache (latest fetch outcome per document)
//!           └── DocumentProvider (HttpProvider, or your own)
//!                 └── GET {base}/spreadsheet/{name}.json?key=...
//! ```
//!
//! Zone extraction itself is pure and lives in `sheetdb-core`; this crate
//! runs it against the cached document once a fetch completes.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetdb_client::{GetRequest, HttpConfig, HttpProvider, QueryOutput, SheetDb};
//! use sheetdb_core::ZoneSpec;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpProvider::new(HttpConfig::new("https://api.example.com"))?;
//! let client = SheetDb::new(provider);
//!
//! let request = GetRequest::new("sales", "secret")
//!     .with_zone(ZoneSpec::new("B2", "D5"));
//!
//! match client.get(&request).await? {
//!     QueryOutput::Zone(zone) => {
//!         for row in &zone.rows {
//!             println!("{:?}: {:?}", row.label, row.data);
//!         }
//!     }
//!     QueryOutput::Document(doc) => println!("{} cells", doc.len()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod provider;
pub mod request;
mod wire;

pub use cache::{CacheEntry, SheetCache};
pub use client::{QueryOutput, RefreshHandle, SheetDb};
pub use error::{ClientError, Result};
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpProvider};
pub use provider::{DocumentProvider, ProviderFailure};
pub use request::{GetRequest, MIN_REFRESH};
