// Dashboard domain models - what a single view needs in one piece
use super::chart::ChartData;
use super::comparison::ComparisonReport;
use super::equipment::EquipmentRecord;
use super::statistics::{Field, FieldStats};
use super::summary::Summary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatsEntry {
    pub field: Field,
    /// `None` when the dataset has no usable records
    pub stats: Option<FieldStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetDashboard {
    pub dataset_id: Option<i64>,
    pub summary: Summary,
    pub statistics: Vec<FieldStatsEntry>,
    pub records: Vec<EquipmentRecord>,
    pub charts: Vec<ChartData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonDashboard {
    pub first: Summary,
    pub second: Summary,
    pub report: ComparisonReport,
    pub charts: Vec<ChartData>,
}
