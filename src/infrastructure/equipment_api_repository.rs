// Equipment API repository implementation
use crate::application::dataset_repository::{DatasetNotFound, DatasetRef, DatasetRepository};
use crate::domain::equipment::{RawEquipmentRecord, RecordSet};
use crate::domain::history::HistoryEntry;
use crate::domain::summary::Summary;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the equipment API that owns CSV uploads and their storage
#[derive(Debug, Clone)]
pub struct EquipmentApiRepository {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl EquipmentApiRepository {
    pub fn new(base_url: String, username: String, password: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the equipment API")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            client,
        })
    }

    /// `{base}/{resource}/` or `{base}/{resource}/{id}/`
    fn build_url(&self, resource: &str, dataset: DatasetRef) -> String {
        match dataset {
            Some(id) => format!("{}/{}/{}/", self.base_url, resource, id),
            None => format!("{}/{}/", self.base_url, resource),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, dataset: DatasetRef) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to the equipment API")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DatasetNotFound(dataset).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Equipment API request {} failed with status {}: {}", url, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse equipment API response from {}", url))
    }
}

#[async_trait]
impl DatasetRepository for EquipmentApiRepository {
    async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        let url = self.build_url("history", None);
        self.get_json(&url, None).await
    }

    async fn fetch_records(&self, dataset: DatasetRef) -> Result<RecordSet> {
        let url = self.build_url("data", dataset);
        let rows: Vec<RawEquipmentRecord> = self.get_json(&url, dataset).await?;
        let total = rows.len();
        let records = RecordSet::from_raw(rows);

        if records.excluded() > 0 {
            tracing::warn!(
                "Dataset {:?}: excluded {} of {} records with missing or non-numeric measurements",
                dataset,
                records.excluded(),
                total
            );
        }

        Ok(records)
    }

    async fn fetch_summary(&self, dataset: DatasetRef) -> Result<Summary> {
        let url = self.build_url("summary", dataset);
        self.get_json(&url, dataset).await
    }
}
