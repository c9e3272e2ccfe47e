//! Summary aggregation
//!
//! Pure functions from a collection of equipment records to the dataset
//! summary and the chart view. There is exactly one averaging
//! implementation: the global summary and the per-type chart share the same
//! fold and rounding, so they cannot diverge.

use std::collections::BTreeMap;

use epd_common::types::{ChartData, DatasetSummary, EquipmentRecord};

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running aggregate for one measure
#[derive(Debug, Clone, Copy)]
struct Running {
    sum: f64,
    min: f64,
    max: f64,
}

impl Running {
    fn new() -> Self {
        Self {
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn observe(&mut self, value: f64) {
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            round2(self.sum / count as f64)
        }
    }

    fn min(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            round2(self.min)
        }
    }

    fn max(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            round2(self.max)
        }
    }
}

/// Compute the summary statistics for a dataset's records.
pub fn summarize(records: &[EquipmentRecord]) -> DatasetSummary {
    let count = records.len();
    let mut flowrate = Running::new();
    let mut pressure = Running::new();
    let mut temperature = Running::new();
    let mut distribution: BTreeMap<String, i64> = BTreeMap::new();

    for record in records {
        flowrate.observe(record.flowrate);
        pressure.observe(record.pressure);
        temperature.observe(record.temperature);
        *distribution.entry(record.equipment_type.clone()).or_insert(0) += 1;
    }

    DatasetSummary {
        total_equipment_count: count as i64,
        average_flowrate: flowrate.mean(count),
        average_pressure: pressure.mean(count),
        average_temperature: temperature.mean(count),
        equipment_type_distribution: distribution,
        max_flowrate: flowrate.max(count),
        min_flowrate: flowrate.min(count),
        max_pressure: pressure.max(count),
        min_pressure: pressure.min(count),
        max_temperature: temperature.max(count),
        min_temperature: temperature.min(count),
    }
}

/// Per-type running aggregate for the chart view
#[derive(Debug, Clone, Copy)]
struct TypeAccumulator {
    count: usize,
    flowrate: f64,
    pressure: f64,
    temperature: f64,
}

/// Compute the chart view: mean of each measure per equipment type, sorted
/// ascending by type name, as parallel sequences aligned by index.
///
/// A single grouped fold maintaining running (sum, count) per type; the
/// per-type value lists are never materialized.
pub fn chart_view(records: &[EquipmentRecord]) -> ChartData {
    let mut by_type: BTreeMap<&str, TypeAccumulator> = BTreeMap::new();

    for record in records {
        let acc = by_type
            .entry(record.equipment_type.as_str())
            .or_insert(TypeAccumulator {
                count: 0,
                flowrate: 0.0,
                pressure: 0.0,
                temperature: 0.0,
            });
        acc.count += 1;
        acc.flowrate += record.flowrate;
        acc.pressure += record.pressure;
        acc.temperature += record.temperature;
    }

    let mut chart = ChartData {
        labels: Vec::with_capacity(by_type.len()),
        flowrate: Vec::with_capacity(by_type.len()),
        pressure: Vec::with_capacity(by_type.len()),
        temperature: Vec::with_capacity(by_type.len()),
    };

    for (label, acc) in by_type {
        let count = acc.count as f64;
        chart.labels.push(label.to_string());
        chart.flowrate.push(round2(acc.flowrate / count));
        chart.pressure.push(round2(acc.pressure / count));
        chart.temperature.push(round2(acc.temperature / count));
    }

    chart
}
