// Per-field descriptive statistics over a record set
use super::equipment::RecordSet;
use super::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Flowrate,
    Pressure,
    Temperature,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Flowrate, Field::Pressure, Field::Temperature];

    pub fn name(self) -> &'static str {
        match self {
            Field::Flowrate => "flowrate",
            Field::Pressure => "pressure",
            Field::Temperature => "temperature",
        }
    }

    /// Human-readable label used on charts
    pub fn label(self) -> &'static str {
        match self {
            Field::Flowrate => "Flowrate",
            Field::Pressure => "Pressure",
            Field::Temperature => "Temperature",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub mean: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean, population standard deviation and range of `field`.
///
/// Fails with [`AnalyticsError::EmptyDataset`] when the set has no records;
/// callers should gate on `total_count > 0` first.
pub fn field_stats(records: &RecordSet, field: Field) -> Result<FieldStats, AnalyticsError> {
    let values: Vec<f64> = records.values(field).collect();
    describe(&values).ok_or(AnalyticsError::EmptyDataset { field })
}

/// Arithmetic mean of `values`, or `None` when there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = scale_for(values);
    let n = values.len() as f64;
    Some(values.iter().map(|v| v / scale).sum::<f64>() / n * scale)
}

// Power of two bringing the largest magnitude into [1, 2). Dividing by it is
// exact, and sums of finite values never overflow to infinity.
fn scale_for(values: &[f64]) -> f64 {
    let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return 1.0;
    }
    2.0_f64.powi((max_abs.log2().floor() as i32).clamp(-1022, 1023))
}

fn describe(values: &[f64]) -> Option<FieldStats> {
    if values.is_empty() {
        return None;
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    // Identical values: report them exactly rather than through the rounding of sum / n
    if min == max {
        return Some(FieldStats {
            mean: min,
            std_dev: 0.0,
            min,
            max,
        });
    }

    let scale = scale_for(values);
    let n = values.len() as f64;
    let scaled_mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;

    Some(FieldStats {
        mean: (scaled_mean * scale).clamp(min, max),
        std_dev: variance.sqrt() * scale,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::equipment::EquipmentRecord;
    use proptest::prelude::*;

    fn set_with_flowrates(values: &[f64]) -> RecordSet {
        RecordSet::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| EquipmentRecord::new(i as i64, format!("E{}", i), "Pump", *v, 1.0, 1.0))
                .collect(),
        )
    }

    #[test]
    fn test_population_std_dev() {
        let set = set_with_flowrates(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        let stats = field_stats(&set, Field::Flowrate).unwrap();

        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_empty_dataset_fails() {
        let err = field_stats(&RecordSet::default(), Field::Pressure).unwrap_err();

        assert_eq!(err, AnalyticsError::EmptyDataset { field: Field::Pressure });
    }

    #[test]
    fn test_identical_values_have_zero_spread() {
        let set = set_with_flowrates(&[0.1, 0.1, 0.1]);

        let stats = field_stats(&set, Field::Flowrate).unwrap();

        assert_eq!(stats.mean, 0.1);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_values_near_float_max_stay_finite() {
        let set = set_with_flowrates(&[1e308, 1.5e308]);

        let stats = field_stats(&set, Field::Flowrate).unwrap();

        assert!((stats.mean - 1.25e308).abs() <= 1.25e308 * 1e-12);
        assert!(stats.std_dev.is_finite());
        assert!((stats.std_dev - 0.25e308).abs() <= 0.25e308 * 1e-12);
    }

    #[test]
    fn test_mean_does_not_overflow() {
        assert_eq!(mean(&[f64::MAX, f64::MAX]), Some(f64::MAX));
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    proptest! {
        #[test]
        fn prop_mean_within_range(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
            let stats = field_stats(&set_with_flowrates(&values), Field::Flowrate).unwrap();
            prop_assert!(stats.min <= stats.mean);
            prop_assert!(stats.mean <= stats.max);
        }

        #[test]
        fn prop_zero_std_dev_iff_all_equal(values in prop::collection::vec(-1.0e3f64..1.0e3, 1..32)) {
            let stats = field_stats(&set_with_flowrates(&values), Field::Flowrate).unwrap();
            let all_equal = values.iter().all(|v| *v == values[0]);
            prop_assert_eq!(stats.std_dev == 0.0, all_equal);
        }

        #[test]
        fn prop_constant_values_zero_std_dev(value in -1.0e6f64..1.0e6, n in 1usize..32) {
            let stats = field_stats(&set_with_flowrates(&vec![value; n]), Field::Flowrate).unwrap();
            prop_assert_eq!(stats.std_dev, 0.0);
            prop_assert_eq!(stats.mean, value);
        }
    }
}
