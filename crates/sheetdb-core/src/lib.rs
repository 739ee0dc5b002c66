//! # sheetdb-core
//!
//! Core data structures for the sheetdb spreadsheet query client.
//!
//! This crate provides the fundamental types used throughout sheetdb:
//! - [`Coord`] - Cell addressing in A1 and zero-based pair notation
//! - [`CellValue`] and [`Cell`] - Computed cell results
//! - [`Document`] - The sparse cell grid for one fetched spreadsheet
//! - [`ZoneSpec`], [`zone::extract`] and [`ZoneResult`] - Rectangular
//!   zone queries with row/column label inference
//!
//! Everything here is synchronous and pure: fetching, caching and
//! refreshing documents live in the `sheetdb-client` crate.
//!
//! ## Example
//!
//! ```rust
//! use sheetdb_core::{zone, Coord, Document};
//!
//! let mut doc = Document::new();
//! doc.insert((0, 0), "Q1"); // row label band
//! doc.insert((1, -1), "East"); // column label band
//! doc.insert((1, 0), 100);
//!
//! let result = zone::extract(&doc, Coord::new(1, 0), Coord::new(1, 0)).unwrap();
//! assert_eq!(result.rows[0].data, vec![100.0]);
//! ```

pub mod coord;
pub mod document;
pub mod error;
pub mod value;
pub mod zone;

// Re-exports for convenience
pub use coord::{column_to_letters, letters_to_column, Coord};
pub use document::Document;
pub use error::{Error, Result};
pub use value::{Cell, CellValue};
pub use zone::{CoordSpec, ZoneResult, ZoneRow, ZoneSpec};
