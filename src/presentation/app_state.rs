// Application state for HTTP handlers
use crate::application::comparison_workspace::ComparisonWorkspace;
use crate::application::dataset_service::DatasetService;

#[derive(Clone)]
pub struct AppState {
    pub dataset_service: DatasetService,
    pub workspace: ComparisonWorkspace,
}

impl AppState {
    pub fn new(dataset_service: DatasetService) -> Self {
        let workspace = ComparisonWorkspace::new(dataset_service.clone());
        Self {
            dataset_service,
            workspace,
        }
    }
}
