// Display formatting - Fixed decimals and N/A over the raw numeric reports
use crate::application::comparison_workspace::WorkspaceSnapshot;
use crate::domain::chart::ChartData;
use crate::domain::comparison::{ComparisonReport, Quotient, Side, SideScore};
use crate::domain::dashboard::{ComparisonDashboard, DatasetDashboard};
use crate::domain::selection::{Phase, SlotState};
use crate::domain::statistics::Field;
use crate::domain::summary::Summary;
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-point formatting that never prints a negative zero, including for
/// small negatives that round to zero
pub fn fixed(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*}", digits, value);
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => magnitude.to_string(),
        _ => formatted,
    }
}

pub fn quotient(value: Quotient, digits: usize) -> String {
    match value {
        Quotient::Defined(v) => fixed(v, digits),
        Quotient::Undefined => NOT_AVAILABLE.to_string(),
    }
}

pub fn percentage(value: f64) -> String {
    format!("{}%", fixed(value, 1))
}

#[derive(Debug, Serialize)]
pub struct StatisticDisplay {
    pub field: Field,
    pub mean: String,
    pub std_dev: String,
    pub range: String,
}

#[derive(Debug, Serialize)]
pub struct DatasetView {
    #[serde(flatten)]
    pub dashboard: DatasetDashboard,
    pub display: Vec<StatisticDisplay>,
}

pub fn dataset_view(dashboard: DatasetDashboard) -> DatasetView {
    let display = dashboard
        .statistics
        .iter()
        .map(|entry| match entry.stats {
            Some(stats) => StatisticDisplay {
                field: entry.field,
                mean: fixed(stats.mean, 2),
                std_dev: fixed(stats.std_dev, 2),
                range: format!("{}-{}", fixed(stats.min, 1), fixed(stats.max, 1)),
            },
            None => StatisticDisplay {
                field: entry.field,
                mean: NOT_AVAILABLE.to_string(),
                std_dev: NOT_AVAILABLE.to_string(),
                range: NOT_AVAILABLE.to_string(),
            },
        })
        .collect();

    DatasetView { dashboard, display }
}

#[derive(Debug, Serialize)]
pub struct DatasetCard {
    pub label: &'static str,
    pub total_count: u64,
    pub excluded_count: u64,
    pub performance_score: String,
    pub efficiency: String,
}

#[derive(Debug, Serialize)]
pub struct WinnerCard {
    pub side: Side,
    pub label: &'static str,
    pub gap: String,
}

#[derive(Debug, Serialize)]
pub struct MetricCard {
    pub field: Field,
    pub direction: &'static str,
    pub percent_change: String,
    pub first_average: String,
    pub second_average: String,
    pub std_dev: String,
    pub first_range: String,
    pub second_range: String,
}

#[derive(Debug, Serialize)]
pub struct ComparisonView {
    pub first: DatasetCard,
    pub second: DatasetCard,
    pub winner: WinnerCard,
    pub metrics: Vec<MetricCard>,
    pub count_diff: i64,
    pub report: ComparisonReport,
    pub charts: Vec<ChartData>,
}

fn card(side: Side, summary: &Summary, score: &SideScore) -> DatasetCard {
    DatasetCard {
        label: side.label(),
        total_count: summary.total_count,
        excluded_count: summary.excluded_count,
        performance_score: percentage(score.performance_score),
        efficiency: quotient(score.efficiency, 2),
    }
}

fn metric_card(report: &ComparisonReport, field: Field, first: &Summary, second: &Summary) -> MetricCard {
    let comparison = report.field(field);
    MetricCard {
        field,
        direction: if comparison.diff >= 0.0 { "↑" } else { "↓" },
        percent_change: quotient(comparison.percent_change, 2),
        first_average: fixed(first.average(field), 2),
        second_average: fixed(second.average(field), 2),
        std_dev: format!(
            "{} vs {}",
            fixed(comparison.first.std_dev, 2),
            fixed(comparison.second.std_dev, 2)
        ),
        first_range: format!("{}-{}", fixed(comparison.first.min, 1), fixed(comparison.first.max, 1)),
        second_range: format!("{}-{}", fixed(comparison.second.min, 1), fixed(comparison.second.max, 1)),
    }
}

pub fn comparison_view(dashboard: ComparisonDashboard) -> ComparisonView {
    let ComparisonDashboard {
        first,
        second,
        report,
        charts,
    } = dashboard;

    let winner = report.winner();

    ComparisonView {
        first: card(Side::First, &first, &report.first),
        second: card(Side::Second, &second, &report.second),
        winner: WinnerCard {
            side: winner,
            label: winner.label(),
            gap: percentage(report.score_gap()),
        },
        metrics: Field::ALL
            .iter()
            .map(|f| metric_card(&report, *f, &first, &second))
            .collect(),
        count_diff: report.count_diff,
        report,
        charts,
    }
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub slot: u8,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceView {
    pub phase: Phase,
    pub slots: Vec<SlotView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_error: Option<String>,
}

fn slot_view(slot: u8, state: &SlotState) -> SlotView {
    let (status, error, summary) = match state {
        SlotState::Empty => ("empty", None, None),
        SlotState::Loading { .. } => ("loading", None, None),
        SlotState::Ready { snapshot, .. } => ("ready", None, Some(snapshot.summary.clone())),
        SlotState::Failed { error, .. } => ("failed", Some(error.clone()), None),
    };

    SlotView {
        slot,
        status,
        dataset_id: state.dataset_id(),
        error,
        summary,
    }
}

pub fn workspace_view(snapshot: WorkspaceSnapshot) -> WorkspaceView {
    let slots = snapshot
        .slots
        .iter()
        .zip(1u8..)
        .map(|(state, slot)| slot_view(slot, state))
        .collect();

    let (comparison, comparison_error) = match snapshot.comparison {
        Some(Ok(dashboard)) => (Some(comparison_view(dashboard)), None),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };

    WorkspaceView {
        phase: snapshot.phase,
        slots,
        comparison,
        comparison_error,
    }
}
