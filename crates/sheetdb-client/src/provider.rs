//! Document provider abstraction

use std::future::Future;

use sheetdb_core::Document;
use thiserror::Error;

/// Failure envelope returned by the document service.
///
/// `error` is a machine-readable code (e.g. `UnknownSpreadsheet`);
/// `error_text` is the human-readable message that goes with it. Transport
/// failures are folded into the same envelope, so consumers see one failure
/// shape regardless of where the fetch died.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}: {error_text}")]
pub struct ProviderFailure {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable message
    pub error_text: String,
}

impl ProviderFailure {
    /// Create a failure envelope.
    pub fn new(error: impl Into<String>, error_text: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_text: error_text.into(),
        }
    }

    /// The envelope substituted when the service cannot be reached or the
    /// response is unusable.
    pub fn unknown_spreadsheet() -> Self {
        Self::new("UnknownSpreadsheet", "bad name or key")
    }

    /// The envelope for a response that reached us but could not be decoded
    /// into a document.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new("MalformedDocument", detail)
    }
}

/// Asynchronous source of spreadsheet documents.
///
/// Implementors fetch the full cell grid for a named, key-protected
/// document. Every call is an independent fetch: providers do not cache,
/// dedupe or retry; that policy belongs to the caller.
pub trait DocumentProvider: Send + Sync {
    /// Fetch the current state of `document`, authenticated by `key`.
    ///
    /// Yields either the complete document or the service's failure
    /// envelope. Dropping the returned future abandons the fetch.
    fn fetch(
        &self,
        document: &str,
        key: &str,
    ) -> impl Future<Output = Result<Document, ProviderFailure>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        let failure = ProviderFailure::unknown_spreadsheet();
        assert_eq!(failure.to_string(), "UnknownSpreadsheet: bad name or key");
    }
}
