//! Test utilities for dataset loader testing
//!
//! Provides CSV fixtures and temporary-file helpers shared by the loader tests
//! and by other services that need a dataset loaded from text.

use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use super::DatasetLoader;
use crate::app::models::{Dataset, ProductionRecord};
use crate::constants::REQUIRED_COLUMNS;


/// Header line with every required column in schema order
pub fn csv_header() -> String {
    REQUIRED_COLUMNS.join(",")
}

/// Small production file spanning two shifts, three products and a missing reason
pub fn sample_csv() -> String {
    format!(
        "{}\n{}",
        csv_header(),
        "2024-03-01,A,Classic Salted,P-01,OP-1,SUP-1,120,100,250,5,30,450,Maintenance
2024-03-01,B,Sour Cream,P-02,OP-2,SUP-1,80,80,200,2,0,480,
2024-03-02,A,Classic Salted,P-01,OP-1,SUP-2,100,90,230,4,15,465,Jam
2024-03-03 08:00:00,B,Barbecue,P-03,OP-3,SUP-2,60,70,150,6,45,435,Maintenance
"
    )
}

/// Write CSV text to a temporary file
pub fn write_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Load CSV text synchronously into a dataset
pub fn dataset_from_csv(content: &str) -> Dataset {
    DatasetLoader::new(false)
        .load_reader("fixture.csv", content.as_bytes())
        .unwrap()
        .dataset
}

/// Builder for in-memory records with neutral defaults
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: ProductionRecord,
}

/// Start a record on the given `YYYY-MM-DD` date
pub fn record(row_id: usize, date: &str) -> RecordBuilder {
    RecordBuilder {
        record: ProductionRecord {
            row_id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            shift: "A".to_string(),
            product_name: "Classic Salted".to_string(),
            product_id: "P-01".to_string(),
            machine_operator_id: "OP-1".to_string(),
            supervisor_id: "SUP-1".to_string(),
            planned_production_units: 100,
            actual_production_units: 100,
            raw_material_used_kg: 100.0,
            waste_weight_kg: 0.0,
            downtime_minutes: 0.0,
            total_time_run_minutes: 480.0,
            downtime_reason: None,
        },
    }
}

impl RecordBuilder {
    pub fn shift(mut self, shift: &str) -> Self {
        self.record.shift = shift.to_string();
        self
    }

    pub fn product(mut self, name: &str) -> Self {
        self.record.product_name = name.to_string();
        self
    }

    pub fn operator(mut self, operator: &str) -> Self {
        self.record.machine_operator_id = operator.to_string();
        self
    }

    pub fn units(mut self, planned: u64, actual: u64) -> Self {
        self.record.planned_production_units = planned;
        self.record.actual_production_units = actual;
        self
    }

    pub fn material(mut self, raw_kg: f64, waste_kg: f64) -> Self {
        self.record.raw_material_used_kg = raw_kg;
        self.record.waste_weight_kg = waste_kg;
        self
    }

    pub fn downtime(mut self, minutes: f64, reason: Option<&str>) -> Self {
        self.record.downtime_minutes = minutes;
        self.record.downtime_reason = reason.map(str::to_string);
        self
    }

    pub fn run_time(mut self, minutes: f64) -> Self {
        self.record.total_time_run_minutes = minutes;
        self
    }

    pub fn build(self) -> ProductionRecord {
        self.record
    }
}

/// Wrap records into a shared dataset snapshot
pub fn dataset(records: Vec<ProductionRecord>) -> Arc<Dataset> {
    Arc::new(Dataset::new("fixture.csv", records))
}
