//! Zone extraction
//!
//! A zone is a caller-specified rectangular sub-region of a document's cell
//! grid, bounded by begin/end coordinates inclusive. Extraction reshapes
//! the sparse store into rows of numbers, inferring optional labels from
//! the cells bordering the zone on its left (row labels) and top (column
//! labels) edges.

use crate::coord::Coord;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::CellValue;

/// Begin or end of a zone, as callers supply it: a decoded pair or A1 text.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordSpec {
    /// An already-decoded coordinate pair, passed through unchanged.
    Pair(Coord),
    /// A1 text, decoded on resolution.
    Text(String),
}

impl CoordSpec {
    /// Decode to a concrete coordinate.
    pub fn resolve(&self) -> Result<Coord> {
        match self {
            CoordSpec::Pair(coord) => Ok(*coord),
            CoordSpec::Text(s) => Coord::parse(s),
        }
    }
}

impl From<Coord> for CoordSpec {
    fn from(coord: Coord) -> Self {
        CoordSpec::Pair(coord)
    }
}

impl From<(i32, i32)> for CoordSpec {
    fn from(pair: (i32, i32)) -> Self {
        CoordSpec::Pair(pair.into())
    }
}

impl From<&str> for CoordSpec {
    fn from(s: &str) -> Self {
        CoordSpec::Text(s.to_string())
    }
}

impl From<String> for CoordSpec {
    fn from(s: String) -> Self {
        CoordSpec::Text(s)
    }
}

/// A rectangular zone request, begin/end inclusive.
///
/// Begin and end are not reordered: a reversed range (begin below or right
/// of end) extracts zero rows or zero columns rather than erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSpec {
    /// Top-left corner
    pub begin: CoordSpec,
    /// Bottom-right corner
    pub end: CoordSpec,
}

impl ZoneSpec {
    /// Create a zone spec from anything coordinate-like.
    pub fn new(begin: impl Into<CoordSpec>, end: impl Into<CoordSpec>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Parse a colon range like "A1:C3"; a bare "A1" is a single-cell zone.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((begin, end)) => {
                Ok(Self::new(Coord::parse(begin)?, Coord::parse(end)?))
            }
            None => {
                let coord = Coord::parse(s)?;
                Ok(Self::new(coord, coord))
            }
        }
    }

    /// Decode both corners.
    pub fn resolve(&self) -> Result<(Coord, Coord)> {
        Ok((self.begin.resolve()?, self.end.resolve()?))
    }
}

/// One result row: numeric data in ascending column order, plus the
/// optional label read from the cell left of the zone on this row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoneRow {
    /// Label from the cell at `(begin.col - 1, row)`, if that cell exists
    /// and has a defined result (any value, falsy ones included).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<CellValue>,
    /// Numeric results, one per column of the zone.
    pub data: Vec<f64>,
}

/// Result of a zone extraction.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoneResult {
    /// Rows in ascending row order.
    pub rows: Vec<ZoneRow>,
    /// Column labels, one entry per column whether labeled or not, from the
    /// cells at `(col, begin.row - 1)`; an entry is `Some` only when that
    /// cell's result is defined and truthy.
    pub columns: Vec<Option<CellValue>>,
}

/// Extract the zone bounded by `begin`/`end` (inclusive) from `document`.
///
/// Every cell inside the zone must exist and hold a numeric result:
/// an absent cell fails with [`Error::MissingCell`], a present cell with a
/// missing or non-numeric result fails with [`Error::NotNumeric`], each
/// naming the exact coordinate. The first error aborts the extraction; no
/// partial result is returned.
///
/// Label inference is asymmetric, and observably so: a row label is used
/// whenever the bordering cell has a defined result (`0`, `""` and null
/// all count), while a column label additionally has to be truthy.
pub fn extract(document: &Document, begin: Coord, end: Coord) -> Result<ZoneResult> {
    let mut rows = Vec::new();

    for y in begin.row..=end.row {
        let mut row = ZoneRow {
            label: None,
            data: Vec::new(),
        };

        let label_coord = Coord::new(begin.col - 1, y);
        if let Some(cell) = document.cell(label_coord) {
            if let Some(value) = &cell.result {
                row.label = Some(value.clone());
            }
        }

        for x in begin.col..=end.col {
            let coord = Coord::new(x, y);
            let cell = document.cell(coord).ok_or(Error::MissingCell(coord))?;

            match cell.result {
                Some(CellValue::Number(n)) => row.data.push(n),
                _ => return Err(Error::NotNumeric(coord)),
            }
        }

        rows.push(row);
    }

    let mut columns = Vec::new();
    for x in begin.col..=end.col {
        let label_coord = Coord::new(x, begin.row - 1);
        let label = document
            .cell(label_coord)
            .and_then(|cell| cell.result.as_ref())
            .filter(|value| value.is_truthy())
            .cloned();

        columns.push(label);
    }

    Ok(ZoneResult { rows, columns })
}
