//! Report Sources
//!
//! A report reads six emission categories and the existing-sink ledger for
//! one window. Each of those seven reads can fail on its own.

use std::fmt;

use emission::{CategoryRecords, EmissionCategory, EmissionRecord};
use kernel::time_window::TimeWindow;
use serde::{Serialize, Serializer};
use sink::CarbonSink;

use crate::error::ReportResult;

/// One independently loaded input of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Emissions(EmissionCategory),
    ExistingSinks,
}

impl DataSource {
    pub const ALL: [DataSource; 7] = [
        Self::Emissions(EmissionCategory::Electricity),
        Self::Emissions(EmissionCategory::FuelCombustion),
        Self::Emissions(EmissionCategory::Shipping),
        Self::Emissions(EmissionCategory::Explosion),
        Self::Emissions(EmissionCategory::CoalBurn),
        Self::Emissions(EmissionCategory::Methane),
        Self::ExistingSinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emissions(category) => category.as_str(),
            Self::ExistingSinks => "sinks",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Read access to the stores a report draws from
#[trait_variant::make(ReportSource: Send)]
pub trait LocalReportSource {
    /// Records of one category created inside `window`, oldest first
    async fn emission_records(
        &self,
        category: EmissionCategory,
        window: &TimeWindow,
    ) -> ReportResult<Vec<EmissionRecord>>;

    /// Existing sinks registered inside `window`, oldest first
    async fn existing_sinks(&self, window: &TimeWindow) -> ReportResult<Vec<CarbonSink>>;
}

/// Everything loaded for one window. Failed sources are empty and listed.
#[derive(Debug, Clone, Default)]
pub struct WindowData {
    pub records: CategoryRecords,
    pub sinks: Vec<CarbonSink>,
    pub failed_sources: Vec<DataSource>,
}
