// Equipment record domain models
use super::statistics::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentRecord {
    pub id: i64,
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl EquipmentRecord {
    pub fn new(
        id: i64,
        equipment_name: impl Into<String>,
        equipment_type: impl Into<String>,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            id,
            equipment_name: equipment_name.into(),
            equipment_type: equipment_type.into(),
            flowrate,
            pressure,
            temperature,
        }
    }

    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Flowrate => self.flowrate,
            Field::Pressure => self.pressure,
            Field::Temperature => self.temperature,
        }
    }

    /// First numeric field that is not a finite number, if any
    fn invalid_field(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| !self.value(*f).is_finite())
    }
}

/// A record as delivered by the equipment API, before validation.
/// Numeric fields may be missing, null, strings or garbage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEquipmentRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub flowrate: Option<Value>,
    #[serde(default)]
    pub pressure: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
}

impl RawEquipmentRecord {
    fn raw_value(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Flowrate => self.flowrate.as_ref(),
            Field::Pressure => self.pressure.as_ref(),
            Field::Temperature => self.temperature.as_ref(),
        }
    }

    fn measurement(&self, field: Field) -> Result<f64, Field> {
        self.raw_value(field)
            .and_then(parse_measurement)
            .ok_or(field)
    }

    /// Validate into a record, or report the first offending field
    pub fn validate(self) -> Result<EquipmentRecord, Field> {
        let flowrate = self.measurement(Field::Flowrate)?;
        let pressure = self.measurement(Field::Pressure)?;
        let temperature = self.measurement(Field::Temperature)?;

        Ok(EquipmentRecord::new(
            self.id.unwrap_or_default(),
            self.equipment_name.unwrap_or_default(),
            self.equipment_type.unwrap_or_default(),
            flowrate,
            pressure,
            temperature,
        ))
    }
}

/// Accepts JSON numbers and numeric strings; anything non-finite is rejected
fn parse_measurement(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Ordered, immutable records of one uploaded dataset.
///
/// Records whose numeric fields are not finite never enter the set; they are
/// counted in [`RecordSet::excluded`] instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<EquipmentRecord>,
    excluded: usize,
}

impl RecordSet {
    pub fn new(records: Vec<EquipmentRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut excluded = 0;

        for record in records {
            match record.invalid_field() {
                None => kept.push(record),
                Some(field) => {
                    tracing::warn!(
                        "Excluding equipment record {} ({}): {} is not a finite number",
                        record.id, record.equipment_name, field
                    );
                    excluded += 1;
                }
            }
        }

        Self {
            records: kept,
            excluded,
        }
    }

    pub fn from_raw(rows: Vec<RawEquipmentRecord>) -> Self {
        let mut records = Vec::with_capacity(rows.len());
        let mut excluded = 0;

        for row in rows {
            let id = row.id;
            match row.validate() {
                Ok(record) => records.push(record),
                Err(field) => {
                    tracing::warn!(
                        "Excluding equipment record {:?}: {} is missing or not numeric",
                        id, field
                    );
                    excluded += 1;
                }
            }
        }

        let mut set = Self::new(records);
        set.excluded += excluded;
        set
    }

    pub fn records(&self) -> &[EquipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped for missing or non-finite measurements
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Leading records in insertion order, at most `n`
    pub fn head(&self, n: usize) -> &[EquipmentRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn values(&self, field: Field) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.value(field))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a EquipmentRecord;
    type IntoIter = std::slice::Iter<'a, EquipmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEquipmentRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_raw_excludes_bad_measurements() {
        let rows = vec![
            raw(json!({"id": 1, "equipment_name": "Pump-1", "equipment_type": "Pump",
                       "flowrate": 120.5, "pressure": 5.2, "temperature": 110.0})),
            raw(json!({"id": 2, "equipment_name": "Valve-1", "equipment_type": "Valve",
                       "pressure": 4.1, "temperature": 105.0})),
            raw(json!({"id": 3, "equipment_name": "Reactor-1", "equipment_type": "Reactor",
                       "flowrate": "n/a", "pressure": 8.0, "temperature": 140.0})),
            raw(json!({"id": 4, "equipment_name": "Condenser-1", "equipment_type": "Condenser",
                       "flowrate": "95.5", "pressure": null, "temperature": 90.0})),
        ];

        let set = RecordSet::from_raw(rows);

        assert_eq!(set.len(), 1);
        assert_eq!(set.excluded(), 3);
        assert_eq!(set.records()[0].equipment_name, "Pump-1");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let row = raw(json!({"id": 7, "equipment_name": "HX-2", "equipment_type": "HeatExchanger",
                             "flowrate": " 88.25 ", "pressure": "6", "temperature": 130}));

        let record = row.validate().unwrap();

        assert_eq!(record.flowrate, 88.25);
        assert_eq!(record.pressure, 6.0);
        assert_eq!(record.temperature, 130.0);
    }

    #[test]
    fn test_missing_type_becomes_empty_string() {
        let row = raw(json!({"id": 9, "equipment_name": "Mystery",
                             "flowrate": 1, "pressure": 1, "temperature": 1}));

        assert_eq!(row.validate().unwrap().equipment_type, "");
    }

    #[test]
    fn test_new_drops_non_finite_records() {
        let set = RecordSet::new(vec![
            EquipmentRecord::new(1, "A", "Pump", 1.0, 2.0, 3.0),
            EquipmentRecord::new(2, "B", "Pump", f64::NAN, 2.0, 3.0),
            EquipmentRecord::new(3, "C", "Pump", 1.0, f64::INFINITY, 3.0),
        ]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.excluded(), 2);
    }

    #[test]
    fn test_head_keeps_insertion_order() {
        let records: Vec<_> = (0..15)
            .map(|i| EquipmentRecord::new(i, format!("E{}", i), "Pump", (15 - i) as f64, 1.0, 1.0))
            .collect();
        let set = RecordSet::new(records);

        let head = set.head(10);
        assert_eq!(head.len(), 10);
        assert_eq!(head[0].equipment_name, "E0");
        assert_eq!(head[9].equipment_name, "E9");
        assert_eq!(set.head(100).len(), 15);
    }
}
