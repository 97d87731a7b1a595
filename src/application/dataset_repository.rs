// Repository trait for equipment dataset access
use crate::domain::equipment::RecordSet;
use crate::domain::history::HistoryEntry;
use crate::domain::summary::Summary;
use async_trait::async_trait;

/// Which dataset to load; `None` means the most recent upload
pub type DatasetRef = Option<i64>;

/// Raised by repositories when the dataset does not exist upstream
#[derive(Debug, thiserror::Error)]
#[error("dataset {} not found", describe(.0))]
pub struct DatasetNotFound(pub DatasetRef);

fn describe(dataset: &DatasetRef) -> String {
    match dataset {
        Some(id) => id.to_string(),
        None => "latest".to_string(),
    }
}

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Most recent uploads, newest first
    async fn list_history(&self) -> anyhow::Result<Vec<HistoryEntry>>;

    /// Records of a dataset in upload order; invalid rows are excluded and counted
    async fn fetch_records(&self, dataset: DatasetRef) -> anyhow::Result<RecordSet>;

    /// Summary as stored by the equipment API
    async fn fetch_summary(&self, dataset: DatasetRef) -> anyhow::Result<Summary>;
}
