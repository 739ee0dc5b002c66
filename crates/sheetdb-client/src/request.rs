//! Query request types.
//!
//! The request shape is typed: a whole-document query and a zone query are
//! the same request with and without a `zone`, and arity/type errors the
//! original wire protocol had to check at runtime simply cannot be
//! constructed. What remains for runtime validation is the part types
//! cannot express: non-empty names and the refresh floor.

use std::time::Duration;

use sheetdb_core::ZoneSpec;

use crate::error::ClientError;

/// Minimum interval accepted by the refresh controller.
pub const MIN_REFRESH: Duration = Duration::from_millis(200);

/// A single query: fetch `document` (authenticated by `key`) and answer
/// with the whole document, or with the extracted zone when one is given.
#[derive(Debug, Clone, PartialEq)]
pub struct GetRequest {
    /// Document name
    pub document: String,
    /// Access key
    pub key: String,
    /// Zone to extract; `None` answers with the whole document
    pub zone: Option<ZoneSpec>,
}

impl GetRequest {
    /// Whole-document request.
    pub fn new(document: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            key: key.into(),
            zone: None,
        }
    }

    /// Narrow the request to a zone.
    pub fn with_zone(mut self, zone: ZoneSpec) -> Self {
        self.zone = Some(zone);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        if self.document.is_empty() {
            return Err(ClientError::Validation(
                "parameter \"document\" is empty".to_string(),
            ));
        }
        if self.key.is_empty() {
            return Err(ClientError::Validation(
                "parameter \"key\" is empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_refresh(interval: Duration) -> Result<(), ClientError> {
    if interval < MIN_REFRESH {
        return Err(ClientError::Validation(format!(
            "refresh interval {}ms is too low (minimum {}ms)",
            interval.as_millis(),
            MIN_REFRESH.as_millis()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_rejected() {
        assert!(GetRequest::new("", "k").validate().is_err());
        assert!(GetRequest::new("sales", "").validate().is_err());
        assert!(GetRequest::new("sales", "k").validate().is_ok());
    }

    #[test]
    fn test_refresh_floor() {
        let err = validate_refresh(Duration::from_millis(150)).unwrap_err();
        assert!(err.to_string().contains("too low"));

        assert!(validate_refresh(Duration::from_millis(200)).is_ok());
        assert!(validate_refresh(Duration::from_secs(5)).is_ok());
    }
}
