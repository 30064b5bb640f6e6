//! C11 — client for the external hard-request document store. Mirrors the
//! reference codebase's `DataServiceClientTrait` pattern: a trait for
//! mockability plus a `reqwest`-backed production implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

/// One approved hard day-off record as exposed by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct HardRequestRecord {
    #[serde(rename = "nurseId")]
    pub nurse_id: String,
    pub date: NaiveDate,
}

/// Abstracts the remote lookup so the pipeline can be exercised against a
/// mock in tests without a network dependency.
#[async_trait]
pub trait HardRequestStore: Send + Sync {
    /// Fetch approved hard day-off records for nurses in `nurse_ids` whose
    /// date falls within `[start, end]` inclusive.
    async fn fetch_hard_requests(
        &self,
        nurse_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HardRequestRecord>, HardRequestStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HardRequestStoreError {
    #[error("hard request store request failed: {0}")]
    Request(String),
    #[error("hard request store returned status {0}")]
    Status(u16),
    #[error("hard request store response could not be parsed: {0}")]
    Decode(String),
}

pub struct HttpHardRequestStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpHardRequestStore {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HardRequestStore for HttpHardRequestStore {
    async fn fetch_hard_requests(
        &self,
        nurse_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HardRequestRecord>, HardRequestStoreError> {
        if nurse_ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(format!("{}/api/v1/hard-requests", self.base_url))
            .query(&[("startDate", start.to_string()), ("endDate", end.to_string())])
            .query(&[("nurseIds", nurse_ids.join(","))])
            .send()
            .await
            .map_err(|e| HardRequestStoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HardRequestStoreError::Status(response.status().as_u16()));
        }

        response
            .json::<Vec<HardRequestRecord>>()
            .await
            .map_err(|e| HardRequestStoreError::Decode(e.to_string()))
    }
}

/// Fetches hard requests and degrades to "none" on any failure, per the
/// store's soft-degrade policy (SPEC_FULL.md §4.11/§7).
pub async fn fetch_or_degrade(
    store: &dyn HardRequestStore,
    nurse_ids: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<HardRequestRecord> {
    match store.fetch_hard_requests(nurse_ids, start, end).await {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "hard request store unavailable, proceeding with no hard requests");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        pub Store {}

        #[async_trait]
        impl HardRequestStore for Store {
            async fn fetch_hard_requests(
                &self,
                nurse_ids: &[String],
                start: NaiveDate,
                end: NaiveDate,
            ) -> Result<Vec<HardRequestRecord>, HardRequestStoreError>;
        }
    }

    #[tokio::test]
    async fn degrades_to_empty_on_store_error() {
        let mut store = MockStore::new();
        store
            .expect_fetch_hard_requests()
            .returning(|_, _, _| Err(HardRequestStoreError::Status(503)));

        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let result = fetch_or_degrade(&store, &["n1".to_string()], start, end).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn passes_through_records_on_success() {
        let mut store = MockStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        store.expect_fetch_hard_requests().returning(move |_, _, _| {
            Ok(vec![HardRequestRecord {
                nurse_id: "n1".to_string(),
                date,
            }])
        });

        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let result = fetch_or_degrade(&store, &["n1".to_string()], start, end).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].nurse_id, "n1");
    }
}
