// Upload history domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An already-summarized past upload, as listed by the equipment API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_count: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_embedded_records() {
        let json = r#"{
            "id": 4,
            "filename": "sample_equipment_data.csv",
            "uploaded_at": "2026-01-12T09:30:00.123456Z",
            "total_count": 15,
            "avg_flowrate": 119.8,
            "avg_pressure": 6.1,
            "avg_temperature": 117.5,
            "equipment_type_distribution": {"Pump": 4},
            "equipment": [{"id": 1}]
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, 4);
        assert_eq!(entry.filename, "sample_equipment_data.csv");
        assert_eq!(entry.total_count, 15);
    }
}
