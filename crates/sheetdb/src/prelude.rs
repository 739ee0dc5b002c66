//! Prelude module - common imports for sheetdb users
//!
//! ```rust
//! use sheetdb::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellValue,
    // Errors
    ClientError,
    // Addressing
    Coord,
    CoordSpec,
    // Document
    Document,
    // Provider
    DocumentProvider,
    // Query API
    GetRequest,
    ProviderFailure,
    QueryOutput,
    RefreshHandle,
    // Cache
    SheetCache,
    SheetDb,
    // Zone types
    ZoneResult,
    ZoneRow,
    ZoneSpec,
};

#[cfg(feature = "http")]
pub use crate::{HttpConfig, HttpProvider};
