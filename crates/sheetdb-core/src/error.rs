//! Error types for sheetdb-core

use crate::coord::Coord;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetdb-core
///
/// All variants are terminal for the operation that produced them; zone
/// extraction in particular never returns a partial result alongside an
/// error. Cell-naming messages use the `"x,y"` pair notation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Coordinate string does not match A1 or pair notation
    #[error("invalid coordinate: {0}")]
    InvalidCoord(String),

    /// A1 encoding requested for a coordinate with a negative component
    #[error("coordinate {0} has no A1 form")]
    NotAddressable(Coord),

    /// Requested cell absent from the sparse store
    #[error("cell {0} does not exist")]
    MissingCell(Coord),

    /// Cell present but its result is not numeric
    #[error("cell {0} result is not a number")]
    NotNumeric(Coord),
}
