//! Wire format for the document service.
//!
//! The service answers a fetch with one JSON object:
//!
//! ```json
//! {
//!   "success": true,
//!   "cells": {
//!     "0,0": { "result": "Q1" },
//!     "1,0": { "result": 100 }
//!   }
//! }
//! ```
//!
//! or, on failure, `{"success": false, "error": "UnknownSpreadsheet",
//! "errorText": "bad name or key"}`. Cell keys are the zero-based `"x,y"`
//! pair notation, negative components included (header bands).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use sheetdb_core::{Cell, CellValue, Coord, Document};

use crate::provider::ProviderFailure;

/// Raw response body, before cell-key decoding.
///
/// Cells are kept as raw JSON maps here: a served `result: null` must stay
/// distinguishable from an absent `result` key, which an
/// `Option<CellValue>` field would collapse.
#[derive(Debug, Deserialize)]
pub(crate) struct WireDocument {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "errorText")]
    pub error_text: Option<String>,
    #[serde(default)]
    pub cells: HashMap<String, serde_json::Map<String, Value>>,
}

impl WireDocument {
    /// Convert into the typed fetch outcome: the document, or the service's
    /// failure envelope; malformed payloads become a decode failure.
    pub(crate) fn into_outcome(self) -> Result<Document, ProviderFailure> {
        if !self.success {
            return Err(ProviderFailure::new(
                self.error.unwrap_or_else(|| "UnknownError".to_string()),
                self.error_text.unwrap_or_default(),
            ));
        }

        let mut document = Document::new();
        for (key, fields) in self.cells {
            let coord = Coord::parse_pair(&key)
                .map_err(|e| ProviderFailure::malformed(e.to_string()))?;

            let result = match fields.get("result") {
                None => None,
                Some(value) => Some(scalar_value(value).ok_or_else(|| {
                    ProviderFailure::malformed(format!("cell {coord} result is not a scalar"))
                })?),
            };

            document.insert(coord, Cell { result });
        }

        Ok(document)
    }
}

fn scalar_value(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(b) => Some(CellValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> WireDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_document() {
        let wire = parse(
            r#"{
                "success": true,
                "cells": {
                    "0,0": {"result": "Q1"},
                    "1,-1": {"result": "East"},
                    "1,0": {"result": 100}
                }
            }"#,
        );

        let doc = wire.into_outcome().unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(
            doc.cell(Coord::new(1, 0)),
            Some(&Cell::new(CellValue::Number(100.0)))
        );
        assert_eq!(
            doc.cell(Coord::new(1, -1)),
            Some(&Cell::new(CellValue::from("East")))
        );
    }

    #[test]
    fn test_failure_envelope() {
        let wire = parse(
            r#"{"success": false, "error": "UnknownSpreadsheet", "errorText": "bad name or key"}"#,
        );

        let failure = wire.into_outcome().unwrap_err();
        assert_eq!(failure, ProviderFailure::unknown_spreadsheet());
    }

    #[test]
    fn test_null_result_is_defined() {
        let wire = parse(r#"{"success": true, "cells": {"0,0": {"result": null}}}"#);
        let doc = wire.into_outcome().unwrap();
        assert_eq!(
            doc.cell(Coord::new(0, 0)),
            Some(&Cell::new(CellValue::Null))
        );
    }

    #[test]
    fn test_missing_result_is_unevaluated() {
        let wire = parse(r#"{"success": true, "cells": {"0,0": {}}}"#);
        let doc = wire.into_outcome().unwrap();
        assert_eq!(doc.cell(Coord::new(0, 0)), Some(&Cell::unevaluated()));
    }

    #[test]
    fn test_malformed_cell_key() {
        let wire = parse(r#"{"success": true, "cells": {"bogus": {"result": 1}}}"#);
        let failure = wire.into_outcome().unwrap_err();
        assert_eq!(failure.error, "MalformedDocument");
    }

    #[test]
    fn test_non_scalar_result() {
        let wire = parse(r#"{"success": true, "cells": {"0,0": {"result": [1, 2]}}}"#);
        let failure = wire.into_outcome().unwrap_err();
        assert_eq!(failure.error, "MalformedDocument");
    }

    #[test]
    fn test_empty_cells_defaults() {
        let wire = parse(r#"{"success": true}"#);
        let doc = wire.into_outcome().unwrap();
        assert!(doc.is_empty());
    }
}
