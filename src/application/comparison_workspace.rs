// Comparison workspace - Two selection slots filled by background fetches
use crate::application::dataset_service::{build_comparison, DatasetService};
use crate::domain::comparison::Side;
use crate::domain::dashboard::ComparisonDashboard;
use crate::domain::error::AnalyticsError;
use crate::domain::selection::{Phase, Selection, SlotState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Point-in-time view of the workspace
#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    pub phase: Phase,
    pub slots: [SlotState; 2],
    /// Present only when both slots are ready
    pub comparison: Option<Result<ComparisonDashboard, AnalyticsError>>,
}

#[derive(Clone)]
pub struct ComparisonWorkspace {
    datasets: DatasetService,
    selection: Arc<Mutex<Selection>>,
}

impl ComparisonWorkspace {
    pub fn new(datasets: DatasetService) -> Self {
        Self {
            datasets,
            selection: Arc::new(Mutex::new(Selection::new())),
        }
    }

    /// Select `dataset_id` for `side` and fetch it in the background.
    ///
    /// The returned handle resolves to `false` when the fetch finished after
    /// the slot had been reselected or cleared, in which case its result was
    /// discarded.
    pub async fn select(&self, side: Side, dataset_id: i64) -> Result<JoinHandle<bool>, AnalyticsError> {
        let token = self.selection.lock().await.begin(side, dataset_id)?;
        tracing::debug!("{} selected dataset {}", side.label(), dataset_id);

        let datasets = self.datasets.clone();
        let selection = self.selection.clone();

        Ok(tokio::spawn(async move {
            let result = datasets
                .load_snapshot(Some(dataset_id))
                .await
                .map_err(|e| {
                    tracing::error!("Error loading dataset {} for {}: {:#}", dataset_id, side.label(), e);
                    format!("{:#}", e)
                });

            let applied = selection.lock().await.complete(token, result);
            if !applied {
                tracing::warn!(
                    "Discarding stale result for dataset {} in {}",
                    dataset_id,
                    side.label()
                );
            }
            applied
        }))
    }

    pub async fn clear(&self, side: Side) {
        self.selection.lock().await.clear(side);
        tracing::debug!("{} cleared", side.label());
    }

    pub async fn snapshot(&self) -> WorkspaceSnapshot {
        let selection = self.selection.lock().await.clone();

        let comparison = selection
            .ready_pair()
            .map(|(first, second)| build_comparison(self.datasets.scoring(), &first, &second));

        WorkspaceSnapshot {
            phase: selection.phase(),
            slots: [
                selection.slot(Side::First).clone(),
                selection.slot(Side::Second).clone(),
            ],
            comparison,
        }
    }
}
