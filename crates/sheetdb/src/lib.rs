//! # sheetdb
//!
//! Client library for a remote spreadsheet document service: fetch a named,
//! key-protected document, cache it in process memory, and query
//! rectangular zones of it as rows and columns of numbers with labels
//! inferred from the bordering cells.
//!
//! ## Querying a zone
//!
//! ```rust,no_run
//! use sheetdb::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpProvider::new(HttpConfig::new("https://api.example.com"))?;
//! let client = SheetDb::new(provider);
//!
//! let request = GetRequest::new("sales", "secret").with_zone(ZoneSpec::parse("B2:D5")?);
//!
//! if let QueryOutput::Zone(zone) = client.get(&request).await? {
//!     for row in &zone.rows {
//!         println!("{:?}: {:?}", row.label, row.data);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Extracting locally
//!
//! The extractor is pure and works on any [`Document`], fetched or built:
//!
//! ```rust
//! use sheetdb::prelude::*;
//!
//! let mut doc = Document::new();
//! doc.insert((0, 0), "Q1");
//! doc.insert((1, -1), "East");
//! doc.insert((1, 0), 100);
//!
//! let result = sheetdb::zone::extract(&doc, Coord::new(1, 0), Coord::new(1, 0)).unwrap();
//! assert_eq!(result.rows[0].data, vec![100.0]);
//! ```

pub mod prelude;

// Re-export the zone module for direct extraction
pub use sheetdb_core::zone;

// Re-export core types
pub use sheetdb_core::{
    column_to_letters,
    letters_to_column,
    // Cell types
    Cell,
    CellValue,
    // Addressing
    Coord,
    CoordSpec,
    // Document
    Document,
    // Error types
    Error,
    Result,
    // Zone types
    ZoneResult,
    ZoneRow,
    ZoneSpec,
};

// Re-export client types
pub use sheetdb_client::{
    CacheEntry, ClientError, DocumentProvider, GetRequest, ProviderFailure, QueryOutput,
    RefreshHandle, SheetCache, SheetDb, MIN_REFRESH,
};

#[cfg(feature = "http")]
pub use sheetdb_client::{HttpConfig, HttpProvider};
