// Dataset comparison - Differences, percent changes, scores and the winner of two datasets
use super::equipment::RecordSet;
use super::error::AnalyticsError;
use super::statistics::{field_stats, Field};
use super::summary::Summary;
use serde::{Deserialize, Serialize, Serializer};

/// Reference ceilings used to normalize averages into 0-100 scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub flowrate_ceiling: f64,
    pub pressure_ceiling: f64,
    pub temperature_ceiling: f64,
    pub count_ceiling: f64,
    pub efficiency_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            flowrate_ceiling: 5.0,
            pressure_ceiling: 50.0,
            temperature_ceiling: 200.0,
            count_ceiling: 25.0,
            efficiency_ceiling: 10.0,
        }
    }
}

impl ScoringConfig {
    pub fn ceiling(&self, field: Field) -> f64 {
        match field {
            Field::Flowrate => self.flowrate_ceiling,
            Field::Pressure => self.pressure_ceiling,
            Field::Temperature => self.temperature_ceiling,
        }
    }

    /// Names of ceilings that are not positive finite numbers
    pub fn invalid_ceilings(&self) -> Vec<&'static str> {
        [
            ("flowrate_ceiling", self.flowrate_ceiling),
            ("pressure_ceiling", self.pressure_ceiling),
            ("temperature_ceiling", self.temperature_ceiling),
            ("count_ceiling", self.count_ceiling),
            ("efficiency_ceiling", self.efficiency_ceiling),
        ]
        .into_iter()
        .filter(|(_, v)| !(v.is_finite() && *v > 0.0))
        .map(|(name, _)| name)
        .collect()
    }

    /// Composite 0-100 score: mean of the three averages, each as a clamped
    /// percentage of its ceiling
    pub fn performance_score(&self, summary: &Summary) -> f64 {
        let total: f64 = Field::ALL
            .iter()
            .map(|f| normalize(summary.average(*f), self.ceiling(*f)))
            .sum();
        total / Field::ALL.len() as f64
    }
}

/// `value / ceiling` as a percentage, clamped to [0, 100]
pub fn normalize(value: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 || !ceiling.is_finite() {
        return 0.0;
    }
    let ratio = value / ceiling;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0) * 100.0
}

/// Result of a division whose denominator may be zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quotient {
    Defined(f64),
    Undefined,
}

impl Quotient {
    pub fn divide(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Quotient::Undefined;
        }
        let value = numerator / denominator;
        if value.is_finite() {
            Quotient::Defined(value)
        } else {
            Quotient::Undefined
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Quotient::Defined(v) => Some(v),
            Quotient::Undefined => None,
        }
    }

    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Quotient::Defined(v) => Quotient::Defined(f(v)),
            Quotient::Undefined => Quotient::Undefined,
        }
    }

    pub fn or_division_by_zero(self, quantity: &'static str) -> Result<f64, AnalyticsError> {
        self.value().ok_or(AnalyticsError::DivisionByZero { quantity })
    }
}

impl From<Result<f64, AnalyticsError>> for Quotient {
    fn from(result: Result<f64, AnalyticsError>) -> Self {
        result.map_or(Quotient::Undefined, Quotient::Defined)
    }
}

impl Serialize for Quotient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Average flowrate per unit of average pressure
pub fn efficiency(summary: &Summary) -> Result<f64, AnalyticsError> {
    Quotient::divide(summary.avg_flowrate, summary.avg_pressure).or_division_by_zero("efficiency")
}

/// Change of `current` relative to `baseline`, in percent
pub fn percent_change(current: f64, baseline: f64) -> Result<f64, AnalyticsError> {
    Quotient::divide(current - baseline, baseline)
        .map(|v| v * 100.0)
        .or_division_by_zero("percent change")
}

/// One dataset's records together with its summary
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSnapshot {
    pub records: RecordSet,
    pub summary: Summary,
}

impl DatasetSnapshot {
    /// The summary's excluded count is taken from the record set, since an
    /// upstream summary only knows the rows it stored.
    pub fn new(records: RecordSet, mut summary: Summary) -> Self {
        summary.excluded_count = records.excluded() as u64;
        Self { records, summary }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpread {
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    pub field: Field,
    /// First average minus second average
    pub diff: f64,
    /// `diff` relative to the second average, in percent
    pub percent_change: Quotient,
    pub first: FieldSpread,
    pub second: FieldSpread,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideScore {
    pub performance_score: f64,
    pub efficiency: Quotient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::First => "Dataset 1",
            Side::Second => "Dataset 2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// One entry per field, in [`Field::ALL`] order
    pub fields: [FieldComparison; 3],
    pub count_diff: i64,
    pub first: SideScore,
    pub second: SideScore,
}

impl ComparisonReport {
    pub fn field(&self, field: Field) -> &FieldComparison {
        &self.fields[field.index()]
    }

    /// Higher performance score wins; the second side only wins when strictly
    /// greater, so ties go to the first side
    pub fn winner(&self) -> Side {
        if self.second.performance_score > self.first.performance_score {
            Side::Second
        } else {
            Side::First
        }
    }

    pub fn score_gap(&self) -> f64 {
        (self.first.performance_score - self.second.performance_score).abs()
    }
}

fn spread(records: &RecordSet, field: Field) -> Result<FieldSpread, AnalyticsError> {
    let stats = field_stats(records, field)?;
    Ok(FieldSpread {
        std_dev: stats.std_dev,
        min: stats.min,
        max: stats.max,
    })
}

fn compare_field(
    field: Field,
    first: &DatasetSnapshot,
    second: &DatasetSnapshot,
) -> Result<FieldComparison, AnalyticsError> {
    let a = first.summary.average(field);
    let b = second.summary.average(field);

    Ok(FieldComparison {
        field,
        diff: a - b,
        percent_change: percent_change(a, b).into(),
        first: spread(&first.records, field)?,
        second: spread(&second.records, field)?,
    })
}

/// Compare two datasets. Both sides must hold at least one record.
pub fn compare(
    config: &ScoringConfig,
    first: &DatasetSnapshot,
    second: &DatasetSnapshot,
) -> Result<ComparisonReport, AnalyticsError> {
    let fields = [
        compare_field(Field::Flowrate, first, second)?,
        compare_field(Field::Pressure, first, second)?,
        compare_field(Field::Temperature, first, second)?,
    ];

    let score = |snapshot: &DatasetSnapshot| SideScore {
        performance_score: config.performance_score(&snapshot.summary),
        efficiency: efficiency(&snapshot.summary).into(),
    };

    Ok(ComparisonReport {
        fields,
        count_diff: first.summary.total_count as i64 - second.summary.total_count as i64,
        first: score(first),
        second: score(second),
    })
}
