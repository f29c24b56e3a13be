//! Search orchestration: issue requests, settle them against the session

use crate::model::{ActiveSection, RequestKey, ResultPage, SearchError, Settlement};
use super::AppController;

impl AppController {
    pub async fn submit_search(&self, raw: &str) {
        let key = {
            let model = self.model.lock().await;
            let key = model.submit_query(raw).await;
            if key.is_some() {
                model.set_active_section(ActiveSection::Results).await;
            }
            key
        };

        match key {
            Some(key) => self.spawn_fetch(key),
            None => tracing::debug!(
                query = raw.trim(),
                "Search skipped (empty or unchanged query)"
            ),
        }
    }

    pub async fn change_page(&self, page: u32) {
        let key = self.model.lock().await.change_page(page).await;
        if let Some(key) = key {
            self.spawn_fetch(key);
        }
    }

    pub async fn step_page(&self, forward: bool) {
        let key = self.model.lock().await.step_page(forward).await;
        if let Some(key) = key {
            self.spawn_fetch(key);
        }
    }

    /// Run the request on its own task so input keeps flowing while it is in flight.
    fn spawn_fetch(&self, key: RequestKey) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch(key).await;
        });
    }

    pub(crate) async fn fetch(&self, key: RequestKey) -> Settlement {
        tracing::debug!(
            generation = key.generation,
            query = %key.query,
            page = key.page,
            "Performing search"
        );
        let result: Result<ResultPage, SearchError> =
            self.client.search(&key.query, key.page).await;

        if let Err(ref e) = result {
            tracing::error!(
                generation = key.generation,
                query = %key.query,
                page = key.page,
                kind = ?e.kind(),
                error = %e,
                "Search failed"
            );
        }

        let model = self.model.lock().await;
        let settlement = model.settle(&key, result).await;
        match settlement {
            Settlement::Stale => tracing::info!(
                generation = key.generation,
                query = %key.query,
                page = key.page,
                "Discarding stale search result"
            ),
            Settlement::Applied(ref notice) => tracing::info!(
                generation = key.generation,
                query = %key.query,
                page = key.page,
                notice = ?notice,
                "Search settled"
            ),
        }
        settlement
    }
}
