//! Cell coordinate codec
//!
//! Cells are addressed in two interchangeable notations: the A1 notation
//! exposed to callers (column letters + 1-based row number, e.g. "B7",
//! "AZ10") and the zero-based `"x,y"` pair notation the document service
//! keys its cell map with. Column letters are a bijective base-26 numeral
//! (A=1, ..., Z=26, AA=27, ...): there is no letter for zero, so encoding
//! must decrement before each digit extraction.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate: zero-based `(column, row)` pair.
///
/// Components are signed. Zone label inference addresses the cells one
/// column left of and one row above the zone origin, and a served document
/// may legitimately carry cells at column -1 or row -1 (header bands), so
/// the store key has to admit them. Only non-negative coordinates have an
/// A1 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Column index (0-based, A=0, B=1, ...)
    pub col: i32,
    /// Row index (0-based internally, 1-based in A1 display)
    pub row: i32,
}

impl Coord {
    /// Create a coordinate from column and row indices.
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Parse a coordinate from A1 notation.
    ///
    /// Case-insensitive; the whole string must be one letter run followed
    /// by one digit run, with row numbers starting at 1.
    ///
    /// # Examples
    /// ```
    /// use sheetdb_core::Coord;
    ///
    /// assert_eq!(Coord::parse("A1").unwrap(), Coord::new(0, 0));
    /// assert_eq!(Coord::parse("az10").unwrap(), Coord::new(51, 9));
    /// assert!(Coord::parse("A0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCoord("empty coordinate".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidCoord(format!("no column letters in '{s}'")));
        }

        let col = letters_to_column(&s[..pos])?;

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidCoord(format!("no row number in '{s}'")));
        }

        // A digit run only: signs and trailing garbage are not coordinates
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCoord(format!("invalid row number in '{s}'")));
        }

        let row: i32 = row_str
            .parse()
            .map_err(|_| Error::InvalidCoord(format!("invalid row number in '{s}'")))?;

        // A1 rows are 1-based
        if row == 0 {
            return Err(Error::InvalidCoord(format!(
                "row number must be >= 1 in '{s}'"
            )));
        }

        Ok(Self { col, row: row - 1 })
    }

    /// Parse a coordinate from the `"x,y"` pair notation used as cell keys.
    ///
    /// Both components may be negative.
    pub fn parse_pair(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidCoord(format!("cannot parse coordinates \"{s}\"")))?;

        let col: i32 = x
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoord(format!("invalid column in \"{s}\"")))?;
        let row: i32 = y
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoord(format!("invalid row in \"{s}\"")))?;

        Ok(Self { col, row })
    }

    /// Format as an A1 string.
    ///
    /// Fails for coordinates with a negative component, which have no A1
    /// representation.
    pub fn to_a1(&self) -> Result<String> {
        if self.col < 0 || self.row < 0 {
            return Err(Error::NotAddressable(*self));
        }

        let mut result = column_to_letters(self.col as u32);
        result.push_str(&(self.row + 1).to_string());
        Ok(result)
    }
}

impl fmt::Display for Coord {
    /// Prints the `"x,y"` pair form, the canonical cell-key notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for Coord {
    type Err = Error;

    /// Parses A1 notation; use [`Coord::parse_pair`] for the key form.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col as u64 + 1; // 1-based for the bijective digits

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
pub fn letters_to_column(letters: &str) -> Result<i32> {
    if letters.is_empty() {
        return Err(Error::InvalidCoord("empty column letters".into()));
    }

    let mut col: i64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidCoord(format!("invalid column letter '{c}'")));
        }
        col = col * 26 + (c.to_ascii_uppercase() as i64 - 'A' as i64 + 1);
        if col > i32::MAX as i64 {
            return Err(Error::InvalidCoord(format!(
                "column '{letters}' is out of range"
            )));
        }
    }

    Ok((col - 1) as i32)
}
