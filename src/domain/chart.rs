// Chart data domain models, format-agnostic input for a rendering client
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
    Radar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(name: impl Into<String>, color: Option<&str>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color: color.map(str::to_string),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

impl ChartData {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: ChartKind,
        categories: Vec<String>,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            categories,
            series,
            y_max: None,
        }
    }

    pub fn with_y_max(mut self, y_max: f64) -> Self {
        self.y_max = Some(y_max);
        self
    }
}
