// Dataset service - Use cases for history, single-dataset views and comparisons
use crate::application::chart_projector::{comparison_charts, dataset_charts};
use crate::application::dataset_repository::{DatasetRef, DatasetRepository};
use crate::domain::comparison::{compare, DatasetSnapshot, ScoringConfig};
use crate::domain::dashboard::{ComparisonDashboard, DatasetDashboard, FieldStatsEntry};
use crate::domain::error::AnalyticsError;
use crate::domain::history::HistoryEntry;
use crate::domain::statistics::{field_stats, Field};
use crate::domain::summary::compute_summary;
use std::sync::Arc;

#[derive(Clone)]
pub struct DatasetService {
    repository: Arc<dyn DatasetRepository>,
    scoring: ScoringConfig,
}

impl DatasetService {
    pub fn new(repository: Arc<dyn DatasetRepository>, scoring: ScoringConfig) -> Self {
        Self {
            repository,
            scoring,
        }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub async fn list_history(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        self.repository.list_history().await
    }

    /// Records and summary of one dataset, fetched concurrently. Fails as a
    /// whole if either request fails.
    pub async fn load_snapshot(&self, dataset: DatasetRef) -> anyhow::Result<DatasetSnapshot> {
        let (records, summary) = futures::try_join!(
            self.repository.fetch_records(dataset),
            self.repository.fetch_summary(dataset),
        )?;

        tracing::debug!(
            "Loaded dataset {:?}: {} records ({} excluded)",
            dataset,
            records.len(),
            records.excluded()
        );

        Ok(DatasetSnapshot::new(records, summary))
    }

    pub async fn dataset_dashboard(&self, dataset: DatasetRef) -> anyhow::Result<DatasetDashboard> {
        let snapshot = self.load_snapshot(dataset).await?;
        let summary = compute_summary(&snapshot.records);

        if summary.total_count + summary.excluded_count != snapshot.summary.total_count {
            tracing::warn!(
                "Dataset {:?}: API reports {} records, {} usable and {} excluded locally",
                dataset,
                snapshot.summary.total_count,
                summary.total_count,
                summary.excluded_count
            );
        }

        let statistics = Field::ALL
            .iter()
            .map(|field| FieldStatsEntry {
                field: *field,
                stats: if summary.has_data() {
                    field_stats(&snapshot.records, *field).ok()
                } else {
                    None
                },
            })
            .collect();

        let charts = dataset_charts(&snapshot.records, &summary);

        Ok(DatasetDashboard {
            dataset_id: dataset,
            summary,
            statistics,
            records: snapshot.records.records().to_vec(),
            charts,
        })
    }

    /// Compare two datasets once both have arrived
    pub async fn compare(&self, first: i64, second: i64) -> anyhow::Result<ComparisonDashboard> {
        let (a, b) = futures::try_join!(self.load_snapshot(Some(first)), self.load_snapshot(Some(second)))?;
        Ok(build_comparison(&self.scoring, &a, &b)?)
    }
}

/// Report and charts for a ready pair of snapshots
pub fn build_comparison(
    scoring: &ScoringConfig,
    first: &DatasetSnapshot,
    second: &DatasetSnapshot,
) -> Result<ComparisonDashboard, AnalyticsError> {
    let report = compare(scoring, first, second)?;
    let charts = comparison_charts(scoring, &first.summary, &second.summary, &report);

    Ok(ComparisonDashboard {
        first: first.summary.clone(),
        second: second.summary.clone(),
        report,
        charts,
    })
}
