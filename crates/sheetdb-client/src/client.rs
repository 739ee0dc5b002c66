//! Query API and refresh controller.

use std::sync::Arc;
use std::time::Duration;

use sheetdb_core::{zone, Document, ZoneResult};
use tokio::task::JoinHandle;

use crate::cache::{CacheEntry, SheetCache};
use crate::error::{ClientError, Result};
use crate::provider::DocumentProvider;
use crate::request::{validate_refresh, GetRequest};

/// Reply to a [`SheetDb::get`] query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// The whole cached document (no zone requested)
    Document(Arc<Document>),
    /// The extracted zone
    Zone(ZoneResult),
}

/// Client for the remote document service.
///
/// Issues fetches through its [`DocumentProvider`], maintains the shared
/// [`SheetCache`], and answers whole-document and zone queries. Cloning is
/// cheap and clones share the provider and cache.
#[derive(Debug)]
pub struct SheetDb<P> {
    provider: Arc<P>,
    cache: Arc<SheetCache>,
}

impl<P> Clone for SheetDb<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<P: DocumentProvider> SheetDb<P> {
    /// Create a client with its own private cache.
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, Arc::new(SheetCache::new()))
    }

    /// Create a client sharing an externally-owned cache.
    pub fn with_cache(provider: P, cache: Arc<SheetCache>) -> Self {
        Self {
            provider: Arc::new(provider),
            cache,
        }
    }

    /// The cache this client reads and replaces.
    pub fn cache(&self) -> &Arc<SheetCache> {
        &self.cache
    }

    /// The current cache entry for `document`, without fetching.
    pub fn cached(&self, document: &str) -> Option<CacheEntry> {
        self.cache.current(document)
    }

    /// Fetch `document` and answer the query.
    ///
    /// Every call issues a fresh provider fetch, even when an entry is
    /// already cached or another fetch for the same name is in flight; the
    /// cache slot belongs to whichever fetch completes last, and the answer
    /// is read from the slot's current entry, so under concurrent gets a
    /// caller can observe a different fetch's document than its own.
    /// Dropping the returned future cancels the in-flight fetch.
    pub async fn get(&self, request: &GetRequest) -> Result<QueryOutput> {
        request.validate()?;

        let outcome = self.fetch_into_cache(&request.document, &request.key).await;
        let entry = self
            .cache
            .current(&request.document)
            .unwrap_or(outcome);
        let document = entry.map_err(ClientError::Provider)?;

        match &request.zone {
            None => Ok(QueryOutput::Document(document)),
            Some(spec) => {
                let (begin, end) = spec.resolve()?;
                let result = zone::extract(&document, begin, end)?;
                Ok(QueryOutput::Zone(result))
            }
        }
    }

    /// Start re-fetching `document` every `interval`, replacing the cache
    /// entry after each completion, failures included, unconditionally.
    ///
    /// The interval must be at least [`MIN_REFRESH`]. The task runs until
    /// the returned handle is stopped; dropping the handle leaves it
    /// running (caller-managed lifetime).
    ///
    /// [`MIN_REFRESH`]: crate::request::MIN_REFRESH
    pub fn refresh(
        &self,
        document: &str,
        key: &str,
        interval: Duration,
    ) -> Result<RefreshHandle>
    where
        P: 'static,
    {
        validate_refresh(interval)?;

        let client = self.clone();
        let document = document.to_string();
        let key = key.to_string();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the initial fetch is
            // `get`'s job, so skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = client.fetch_into_cache(&document, &key).await;
            }
        });

        Ok(RefreshHandle { task })
    }

    async fn fetch_into_cache(&self, document: &str, key: &str) -> CacheEntry {
        tracing::debug!("Fetching document {:?}", document);

        let outcome = match self.provider.fetch(document, key).await {
            Ok(doc) => Ok(Arc::new(doc)),
            Err(failure) => {
                tracing::warn!("Fetch of {:?} failed: {}", document, failure);
                Err(failure)
            }
        };

        let entry = self.cache.store(document, outcome);
        tracing::info!("Replaced cache entry for {:?}", document);
        entry
    }
}

/// Handle to a running refresh task.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the periodic refresh, cancelling any in-flight fetch.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the task has terminated.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderFailure;
    use crate::request::MIN_REFRESH;
    use pretty_assertions::assert_eq;
    use sheetdb_core::{Cell, CellValue, Coord, ZoneSpec};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider serving canned outcomes in order, repeating the last one.
    struct MockProvider {
        outcomes: Mutex<Vec<std::result::Result<Document, ProviderFailure>>>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(
            outcomes: Vec<std::result::Result<Document, ProviderFailure>>,
        ) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
            }
        }

        fn serving(document: Document) -> Self {
            Self::new(vec![Ok(document)])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DocumentProvider for MockProvider {
        async fn fetch(
            &self,
            _document: &str,
            _key: &str,
        ) -> std::result::Result<Document, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0].clone()
            }
        }
    }

    fn sales_document() -> Document {
        let mut doc = Document::new();
        doc.insert((0, 0), "Q1");
        doc.insert((1, -1), "East");
        doc.insert((1, 0), 100);
        doc
    }

    #[tokio::test]
    async fn test_get_whole_document() {
        let client = SheetDb::new(MockProvider::serving(sales_document()));
        let output = client.get(&GetRequest::new("sales", "k")).await.unwrap();

        match output {
            QueryOutput::Document(doc) => {
                assert_eq!(doc.cell(Coord::new(1, 0)), Some(&Cell::new(100)))
            }
            other => panic!("expected whole document, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_zone() {
        let client = SheetDb::new(MockProvider::serving(sales_document()));
        let request =
            GetRequest::new("sales", "k").with_zone(ZoneSpec::new("B1", "B1"));

        let output = client.get(&request).await.unwrap();
        match output {
            QueryOutput::Zone(zone) => {
                assert_eq!(zone.rows.len(), 1);
                assert_eq!(zone.rows[0].label, Some(CellValue::from("Q1")));
                assert_eq!(zone.rows[0].data, vec![100.0]);
                assert_eq!(zone.columns, vec![Some(CellValue::from("East"))]);
            }
            other => panic!("expected zone, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zone_decode_failure_is_terminal() {
        let client = SheetDb::new(MockProvider::serving(sales_document()));
        let request =
            GetRequest::new("sales", "k").with_zone(ZoneSpec::new("!!", "B1"));

        let err = client.get(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces() {
        let client = SheetDb::new(MockProvider::new(vec![Err(
            ProviderFailure::unknown_spreadsheet(),
        )]));

        let err = client.get(&GetRequest::new("sales", "k")).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Provider(ProviderFailure::unknown_spreadsheet())
        );
    }

    #[tokio::test]
    async fn test_every_get_fetches() {
        let provider = MockProvider::serving(sales_document());
        let client = SheetDb::new(provider);
        let request = GetRequest::new("sales", "k");

        client.get(&request).await.unwrap();
        client.get(&request).await.unwrap();
        client.get(&request).await.unwrap();

        assert_eq!(client.provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_later_fetch_replaces_entry() {
        let mut second = Document::new();
        second.insert((0, 0), 2);

        let provider =
            MockProvider::new(vec![Ok(sales_document()), Ok(second.clone())]);
        let client = SheetDb::new(provider);
        let request = GetRequest::new("sales", "k");

        client.get(&request).await.unwrap();
        client.get(&request).await.unwrap();

        match client.cached("sales") {
            Some(Ok(doc)) => assert_eq!(*doc, second),
            other => panic!("expected cached document, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_replaces_good_entry() {
        // Periodic refresh stores failures unconditionally; a fetch that
        // fails after a success overwrites the good entry.
        let provider = MockProvider::new(vec![
            Ok(sales_document()),
            Err(ProviderFailure::unknown_spreadsheet()),
        ]);
        let client = SheetDb::new(provider);
        let request = GetRequest::new("sales", "k");

        client.get(&request).await.unwrap();
        assert!(client.get(&request).await.is_err());
        assert!(matches!(client.cached("sales"), Some(Err(_))));
    }

    #[tokio::test]
    async fn test_empty_document_name_rejected() {
        let client = SheetDb::new(MockProvider::serving(Document::new()));
        let err = client.get(&GetRequest::new("", "k")).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(client.provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_below_floor_rejected() {
        let client = SheetDb::new(MockProvider::serving(Document::new()));
        let err = client
            .refresh("sales", "k", Duration::from_millis(150))
            .unwrap_err();
        assert!(err.to_string().contains("too low"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_fetches_periodically() {
        let client = SheetDb::new(MockProvider::serving(sales_document()));
        let handle = client.refresh("sales", "k", MIN_REFRESH).unwrap();

        // No immediate fetch: the first one lands after a full interval.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(client.provider.calls(), 0);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        let after_five = client.provider.calls();
        assert!(after_five >= 4, "expected >= 4 fetches, got {after_five}");
        assert!(matches!(client.cached("sales"), Some(Ok(_))));

        handle.stop();
        // Give the abort a chance to land, then verify no further fetches.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let stopped_at = client.provider.calls();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(client.provider.calls(), stopped_at);
        assert!(handle.is_stopped());
    }
}
