//! Domain Entities
//!
//! A carbon sink is an area of vegetation that absorbs CO2. Planned sinks
//! and sinks that already exist on site are kept in separate ledgers.

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::SinkId;
use serde::Serialize;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Which ledger a sink belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// Proposed sink registered through the planning form
    Planned,
    /// Vegetation already on site; counted as absorption in reports
    Existing,
}

impl SinkKind {
    /// Stored discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "sink",
            Self::Existing => "existingSink",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sink" => Some(Self::Planned),
            "existingSink" => Some(Self::Existing),
            _ => None,
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSink {
    pub id: SinkId,
    #[serde(skip)]
    pub kind: SinkKind,
    pub name: String,
    pub vegetation_type: Option<String>,
    /// Hectares
    pub area_covered: f64,
    /// Tons of CO2 per hectare per year
    pub carbon_sequestration_rate: f64,
    /// Tons of CO2 per hectare per day; absent on rows imported without it
    pub daily_sequestration_rate: Option<f64>,
    pub location: Option<String>,
    pub additional_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CarbonSink {
    /// Per-hectare daily rate, derived from the yearly rate when not stored
    pub fn daily_rate_per_hectare(&self) -> f64 {
        self.daily_sequestration_rate
            .unwrap_or(self.carbon_sequestration_rate / DAYS_PER_YEAR)
    }

    /// Tons of CO2 the whole area absorbs per day
    pub fn daily_absorption(&self) -> f64 {
        self.daily_rate_per_hectare() * self.area_covered
    }
}

/// What a registration reports back besides the stored sink
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkRegistration {
    pub sink: CarbonSink,
    /// Whole-area daily absorption
    pub daily_sequestration_rate: String,
    pub total_sequestration: String,
}
