//! Page-by-count pagination over the engine's scroll cursor.
//!
//! The scroll cursor only moves forward, so reaching page `n` costs one
//! initial search plus `n - 1` continuations. Intermediate pages are fetched
//! and dropped.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::types::{SearchPage, SearchRequest};
use table_search_shared::{PageWindow, ResultSet};

/// Walks a scroll cursor forward to a requested page.
///
/// The cursor opened by the initial search is always released before
/// [`walk`](Self::walk) returns, whatever the outcome.
pub struct CursorWalker<'a> {
    engine: &'a dyn SearchEngineClient,
    keep_alive: &'a str,
}

impl<'a> CursorWalker<'a> {
    pub fn new(engine: &'a dyn SearchEngineClient, keep_alive: &'a str) -> Self {
        Self { engine, keep_alive }
    }

    /// Return the page described by `window` for `body` over `indexes`.
    ///
    /// Errors from the initial search or from a continuation are returned as
    /// is. A failed release is returned when the walk itself succeeded, and
    /// only logged when the walk already failed.
    #[instrument(skip(self, body), fields(page = window.page_number(), size = window.page_size()))]
    pub async fn walk(
        &self,
        indexes: Vec<String>,
        body: Value,
        window: PageWindow,
    ) -> Result<ResultSet, SearchError> {
        let request = SearchRequest::new(indexes, body)
            .with_size(window.page_size())
            .with_scroll(self.keep_alive);

        let first = self.engine.search(&request).await?;
        let mut scroll_id = first.scroll_id.clone();

        let outcome = self.advance(first, window, &mut scroll_id).await;
        let released = self.release(scroll_id.as_deref()).await;

        match (outcome, released) {
            (Ok(result), Ok(())) => Ok(result),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(release_error)) => {
                warn!(error = %release_error, "Failed to release scroll after a failed walk");
                Err(e)
            }
        }
    }

    /// Continue the cursor until the requested page is reached.
    ///
    /// `scroll_id` is kept pointing at the latest cursor id so the caller can
    /// release it even when a continuation fails.
    async fn advance(
        &self,
        first: SearchPage,
        window: PageWindow,
        scroll_id: &mut Option<String>,
    ) -> Result<ResultSet, SearchError> {
        if first.hits.is_empty() {
            debug!(total = first.total, "First page is empty, skipping continuation");
            return Ok(first.into());
        }

        let mut current = first;
        let mut page = 1;
        while page < window.page_number() {
            let id = scroll_id
                .as_deref()
                .ok_or_else(|| SearchError::parse("Search response did not include a scroll id"))?;

            let next = self.engine.scroll(id, self.keep_alive).await?;
            if let Some(refreshed) = next.scroll_id.clone() {
                *scroll_id = Some(refreshed);
            }

            current = next;
            page += 1;
        }

        debug!(
            page,
            total = current.total,
            hits = current.hits.len(),
            "Reached requested page"
        );
        Ok(current.into())
    }

    async fn release(&self, scroll_id: Option<&str>) -> Result<(), SearchError> {
        match scroll_id {
            Some(id) => self.engine.clear_scroll(id).await,
            None => {
                debug!("No scroll id to release");
                Ok(())
            }
        }
    }
}
