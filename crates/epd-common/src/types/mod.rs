//! Common types used across EPD
//!
//! These are the wire types shared by the server and the CLI. The field
//! names of [`DatasetSummary`] and [`ChartData`] are a stable persisted
//! format: summaries are stored as JSON on the dataset record and consumed
//! by every client, so renaming a field here is a breaking change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One validated equipment data row: the typed form shared by the
/// validator, the aggregator, and the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// A persisted equipment item, owned by exactly one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: Uuid,
    pub dataset_id: Uuid,
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub created_at: DateTime<Utc>,
}

impl EquipmentItem {
    /// Project the item back onto its measure record
    pub fn record(&self) -> EquipmentRecord {
        EquipmentRecord {
            equipment_name: self.equipment_name.clone(),
            equipment_type: self.equipment_type.clone(),
            flowrate: self.flowrate,
            pressure: self.pressure,
            temperature: self.temperature,
        }
    }
}

/// A persisted dataset: one ingested CSV upload and its derived summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub filename: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    /// Written exactly once at ingestion time, then immutable
    pub summary: Option<DatasetSummary>,
}

/// Aggregate statistics attached to a dataset at ingestion time.
///
/// All means and extrema are rounded to 2 decimal places and are 0 for an
/// empty item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_equipment_count: i64,
    pub average_flowrate: f64,
    pub average_pressure: f64,
    pub average_temperature: f64,
    pub equipment_type_distribution: BTreeMap<String, i64>,
    pub max_flowrate: f64,
    pub min_flowrate: f64,
    pub max_pressure: f64,
    pub min_pressure: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

/// Per-equipment-type mean measures, as parallel sequences aligned by
/// index and sorted ascending by type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub flowrate: Vec<f64>,
    pub pressure: Vec<f64>,
    pub temperature: Vec<f64>,
}

/// What an ingestion returns to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub id: Uuid,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
    pub summary: DatasetSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> DatasetSummary {
        DatasetSummary {
            total_equipment_count: 2,
            average_flowrate: 15.0,
            average_pressure: 3.0,
            average_temperature: 30.0,
            equipment_type_distribution: BTreeMap::from([("Pump".to_string(), 2)]),
            max_flowrate: 20.0,
            min_flowrate: 10.0,
            max_pressure: 4.0,
            min_pressure: 2.0,
            max_temperature: 35.0,
            min_temperature: 25.0,
        }
    }

    #[test]
    fn test_summary_field_names_are_stable() {
        let value = serde_json::to_value(sample_summary()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();

        for expected in [
            "total_equipment_count",
            "average_flowrate",
            "average_pressure",
            "average_temperature",
            "equipment_type_distribution",
            "max_flowrate",
            "min_flowrate",
            "max_pressure",
            "min_pressure",
            "max_temperature",
            "min_temperature",
        ] {
            assert!(keys.contains(&expected), "missing summary field {expected}");
        }
        assert_eq!(keys.len(), 11);
    }

    #[test]
    fn test_summary_round_trip() {
        let summary = sample_summary();
        let json = serde_json::to_string(&summary).unwrap();
        let back: DatasetSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_chart_data_field_names_are_stable() {
        let chart = ChartData {
            labels: vec!["Pump".to_string()],
            flowrate: vec![15.0],
            pressure: vec![3.0],
            temperature: vec![30.0],
        };
        let value = serde_json::to_value(chart).unwrap();
        let object = value.as_object().unwrap();
        for expected in ["labels", "flowrate", "pressure", "temperature"] {
            assert!(object.contains_key(expected), "missing chart field {expected}");
        }
        assert_eq!(object.len(), 4);
    }

    #[test]
    fn test_item_record_projection() {
        let item = EquipmentItem {
            id: Uuid::new_v4(),
            dataset_id: Uuid::new_v4(),
            equipment_name: "Pump-1".to_string(),
            equipment_type: "Pump".to_string(),
            flowrate: 10.0,
            pressure: 2.0,
            temperature: 25.0,
            created_at: Utc::now(),
        };
        let record = item.record();
        assert_eq!(record.equipment_name, "Pump-1");
        assert_eq!(record.flowrate, 10.0);
    }
}
