//! Number formatting shared by every renderer

pub use crate::numbers::{count, decimal2, per_unit, percent, share, thousands, weight};

use crate::app::services::report_engine::{Kpi, KpiUnit};

/// Display string of a KPI according to its unit
pub fn kpi_value(kpi: &Kpi) -> String {
    match kpi.name.unit() {
        KpiUnit::Count => thousands(kpi.value),
        KpiUnit::Ratio => percent(kpi.value),
        KpiUnit::Weight => weight(kpi.value),
    }
}
