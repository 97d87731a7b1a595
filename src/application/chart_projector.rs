// Chart projector - Maps summaries, record sets and comparison reports into chart data
use crate::domain::chart::{ChartData, ChartKind, SeriesData};
use crate::domain::comparison::{normalize, ComparisonReport, ScoringConfig, Side};
use crate::domain::equipment::RecordSet;
use crate::domain::statistics::Field;
use crate::domain::summary::Summary;

/// Per-record charts show this many records, in insertion order
pub const TOP_RECORDS: usize = 10;

const PRIMARY_COLOR: &str = "#2E6BF0";
const SECONDARY_COLOR: &str = "#60a5fa";

const RADAR_AXES: [&str; 5] = ["Flowrate", "Pressure", "Temperature", "Equipment Count", "Efficiency"];

fn side_color(side: Side) -> &'static str {
    match side {
        Side::First => PRIMARY_COLOR,
        Side::Second => SECONDARY_COLOR,
    }
}

fn distribution_pie(id: &str, title: &str, summary: &Summary) -> ChartData {
    let categories: Vec<String> = summary
        .equipment_type_distribution
        .types()
        .map(str::to_string)
        .collect();
    let counts: Vec<f64> = summary
        .equipment_type_distribution
        .iter()
        .map(|(_, count)| count as f64)
        .collect();

    ChartData::new(
        id,
        title,
        ChartKind::Pie,
        categories,
        vec![SeriesData::new("Equipment Count", None, counts)],
    )
}

pub fn type_distribution_chart(summary: &Summary) -> ChartData {
    distribution_pie("type-distribution", "Equipment Type Distribution", summary)
}

/// First [`TOP_RECORDS`] records by insertion order, not sorted by magnitude
pub fn record_series_chart(records: &RecordSet, field: Field) -> ChartData {
    let head = records.head(TOP_RECORDS);
    let (kind, color) = match field {
        Field::Flowrate => (ChartKind::Bar, PRIMARY_COLOR),
        Field::Pressure => (ChartKind::Line, PRIMARY_COLOR),
        Field::Temperature => (ChartKind::Line, SECONDARY_COLOR),
    };

    ChartData::new(
        format!("{}-by-equipment", field.name()),
        format!("{} by Equipment (Top {})", field.label(), TOP_RECORDS),
        kind,
        head.iter().map(|r| r.equipment_name.clone()).collect(),
        vec![SeriesData::new(
            field.label(),
            Some(color),
            head.iter().map(|r| r.value(field)).collect(),
        )],
    )
}

/// Distribution pie plus one per-record chart per field
pub fn dataset_charts(records: &RecordSet, summary: &Summary) -> Vec<ChartData> {
    let mut charts = vec![type_distribution_chart(summary)];
    charts.extend(Field::ALL.iter().map(|f| record_series_chart(records, *f)));
    charts
}

/// Grouped bars over the union of both datasets' types; a type missing on one
/// side counts as zero
pub fn type_comparison_chart(first: &Summary, second: &Summary) -> ChartData {
    let mut types: Vec<&str> = first.equipment_type_distribution.types().collect();
    for t in second.equipment_type_distribution.types() {
        if !types.contains(&t) {
            types.push(t);
        }
    }

    let counts = |summary: &Summary| -> Vec<f64> {
        types
            .iter()
            .map(|t| summary.equipment_type_distribution.get(t).unwrap_or(0) as f64)
            .collect()
    };

    ChartData::new(
        "type-comparison",
        "Equipment Type Comparison",
        ChartKind::Bar,
        types.iter().map(|t| t.to_string()).collect(),
        vec![
            SeriesData::new(Side::First.label(), Some(PRIMARY_COLOR), counts(first)),
            SeriesData::new(Side::Second.label(), Some(SECONDARY_COLOR), counts(second)),
        ],
    )
}

pub fn parameters_chart(first: &Summary, second: &Summary) -> ChartData {
    let averages = |summary: &Summary| -> Vec<f64> {
        Field::ALL.iter().map(|f| summary.average(*f)).collect()
    };

    ChartData::new(
        "parameters-comparison",
        "Average Parameters",
        ChartKind::Bar,
        Field::ALL.iter().map(|f| format!("Avg {}", f.label())).collect(),
        vec![
            SeriesData::new(Side::First.label(), Some(PRIMARY_COLOR), averages(first)),
            SeriesData::new(Side::Second.label(), Some(SECONDARY_COLOR), averages(second)),
        ],
    )
}

fn radar_values(config: &ScoringConfig, summary: &Summary, report: &ComparisonReport, side: Side) -> Vec<f64> {
    let score = match side {
        Side::First => &report.first,
        Side::Second => &report.second,
    };

    let efficiency = match score.efficiency.value() {
        Some(value) => normalize(value, config.efficiency_ceiling),
        None => {
            tracing::debug!("{} efficiency is undefined, plotting 0 on the radar", side.label());
            0.0
        }
    };

    let mut values: Vec<f64> = Field::ALL
        .iter()
        .map(|f| normalize(summary.average(*f), config.ceiling(*f)))
        .collect();
    values.push(normalize(summary.total_count as f64, config.count_ceiling));
    values.push(efficiency);
    values
}

/// Five axes, each a clamped percentage of its configured ceiling
pub fn radar_chart(
    config: &ScoringConfig,
    first: &Summary,
    second: &Summary,
    report: &ComparisonReport,
) -> ChartData {
    let series = [(Side::First, first), (Side::Second, second)]
        .into_iter()
        .map(|(side, summary)| {
            SeriesData::new(
                side.label(),
                Some(side_color(side)),
                radar_values(config, summary, report, side),
            )
        })
        .collect();

    ChartData::new(
        "performance-radar",
        "Performance Radar",
        ChartKind::Radar,
        RADAR_AXES.iter().map(|a| a.to_string()).collect(),
        series,
    )
    .with_y_max(100.0)
}

pub fn std_dev_chart(report: &ComparisonReport) -> ChartData {
    let first: Vec<f64> = report.fields.iter().map(|c| c.first.std_dev).collect();
    let second: Vec<f64> = report.fields.iter().map(|c| c.second.std_dev).collect();

    ChartData::new(
        "std-dev-comparison",
        "Standard Deviation",
        ChartKind::Bar,
        Field::ALL.iter().map(|f| f.label().to_string()).collect(),
        vec![
            SeriesData::new("Dataset 1 Std Dev", Some(PRIMARY_COLOR), first),
            SeriesData::new("Dataset 2 Std Dev", Some(SECONDARY_COLOR), second),
        ],
    )
}

/// Every chart of the comparison view
pub fn comparison_charts(
    config: &ScoringConfig,
    first: &Summary,
    second: &Summary,
    report: &ComparisonReport,
) -> Vec<ChartData> {
    vec![
        type_comparison_chart(first, second),
        parameters_chart(first, second),
        radar_chart(config, first, second, report),
        std_dev_chart(report),
        distribution_pie("dataset1-distribution", "Dataset 1 Distribution", first),
        distribution_pie("dataset2-distribution", "Dataset 2 Distribution", second),
    ]
}
