// Dataset summary domain models and computation
use super::equipment::RecordSet;
use super::statistics::{mean, Field};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Equipment count per type, keyed in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDistribution(IndexMap<String, u64>);

impl TypeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, equipment_type: &str) {
        *self.0.entry(equipment_type.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, equipment_type: &str) -> Option<u64> {
        self.0.get(equipment_type).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(t, c)| (t.as_str(), *c))
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_count: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub equipment_type_distribution: TypeDistribution,
    /// Rows left out of the statistics for missing or non-numeric measurements
    #[serde(default, skip_serializing_if = "is_zero")]
    pub excluded_count: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl Summary {
    pub fn average(&self, field: Field) -> f64 {
        match field {
            Field::Flowrate => self.avg_flowrate,
            Field::Pressure => self.avg_pressure,
            Field::Temperature => self.avg_temperature,
        }
    }

    /// Averages are reported as 0 for an empty dataset; use this to tell "no data" apart
    pub fn has_data(&self) -> bool {
        self.total_count > 0
    }
}

/// Counts, per-field averages and type distribution of a record set
pub fn compute_summary(records: &RecordSet) -> Summary {
    let mut distribution = TypeDistribution::new();
    for record in records {
        distribution.increment(&record.equipment_type);
    }
    debug_assert_eq!(distribution.total(), records.len() as u64);

    let average = |field: Field| {
        let values: Vec<f64> = records.values(field).collect();
        mean(&values).unwrap_or(0.0)
    };

    Summary {
        total_count: records.len() as u64,
        avg_flowrate: average(Field::Flowrate),
        avg_pressure: average(Field::Pressure),
        avg_temperature: average(Field::Temperature),
        equipment_type_distribution: distribution,
        excluded_count: records.excluded() as u64,
    }
}
