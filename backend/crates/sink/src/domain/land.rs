//! Land Requirement
//!
//! How much land a planned sink needs to absorb a yearly CO2 target, given
//! the vegetation and how well the soil suits it.

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::LandCalculationId;
use serde::Serialize;

pub const DEFAULT_PROJECT_YEARS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestType {
    Tropical,
    Temperate,
    Boreal,
}

impl ForestType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tropical" => Some(Self::Tropical),
            "temperate" => Some(Self::Temperate),
            "boreal" => Some(Self::Boreal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Temperate => "temperate",
            Self::Boreal => "boreal",
        }
    }
}

/// Vegetation planted on the land; forests carry their climate zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandType {
    Forest(ForestType),
    Mangrove,
    Grassland,
    Wetland,
    Agroforestry,
}

impl LandType {
    /// `forest_type` is only read for `forest`
    pub fn parse(land_type: &str, forest_type: Option<&str>) -> Option<Self> {
        match land_type {
            "forest" => forest_type.and_then(ForestType::from_tag).map(Self::Forest),
            "mangrove" => Some(Self::Mangrove),
            "grassland" => Some(Self::Grassland),
            "wetland" => Some(Self::Wetland),
            "agroforestry" => Some(Self::Agroforestry),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forest(_) => "forest",
            Self::Mangrove => "mangrove",
            Self::Grassland => "grassland",
            Self::Wetland => "wetland",
            Self::Agroforestry => "agroforestry",
        }
    }

    pub fn forest_type(&self) -> Option<ForestType> {
        match self {
            Self::Forest(forest) => Some(*forest),
            _ => None,
        }
    }

    /// Typical tons of CO2 absorbed per hectare per year
    pub fn sequestration_rate(&self) -> f64 {
        match self {
            Self::Forest(ForestType::Tropical) => 10.0,
            Self::Forest(ForestType::Temperate) => 5.0,
            Self::Forest(ForestType::Boreal) => 3.0,
            Self::Mangrove => 14.0,
            Self::Grassland => 3.0,
            Self::Wetland => 4.0,
            Self::Agroforestry => 6.0,
        }
    }
}

impl fmt::Display for LandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.forest_type() {
            Some(forest) => write!(f, "forest/{}", forest.as_str()),
            None => f.write_str(self.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoilCondition {
    #[default]
    Ideal,
    ModeratelySuitable,
    MarginallySuitable,
    Unsuitable,
}

impl SoilCondition {
    /// Unknown tags read as ideal soil
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("moderately_suitable") => Self::ModeratelySuitable,
            Some("marginally_suitable") => Self::MarginallySuitable,
            Some("unsuitable") => Self::Unsuitable,
            _ => Self::Ideal,
        }
    }

    /// Share of the typical rate this soil achieves
    pub fn suitability_factor(&self) -> f64 {
        match self {
            Self::Ideal => 1.0,
            Self::ModeratelySuitable => 0.8,
            Self::MarginallySuitable => 0.5,
            Self::Unsuitable => 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRequirement {
    /// Hectares, rounded up to a whole hectare
    pub required_land: f64,
    pub sequestration_rate: f64,
    /// Tons of CO2 over the project duration
    pub total_carbon_sequestered: f64,
    /// Percent of the target met over the project duration
    pub land_utilization_efficiency: f64,
}

impl LandRequirement {
    /// `target` is tons of CO2 per year, `years` the project duration
    pub fn calculate(target: f64, land: LandType, soil: SoilCondition, years: f64) -> Self {
        let rate = land.sequestration_rate();
        let effective_rate = rate * soil.suitability_factor();
        let exact_land = target / effective_rate;
        let total = exact_land * effective_rate * years;

        Self {
            required_land: exact_land.ceil(),
            sequestration_rate: rate,
            total_carbon_sequestered: total,
            land_utilization_efficiency: total / (target * years) * 100.0,
        }
    }
}

/// A stored calculation with its inputs
#[derive(Debug, Clone, PartialEq)]
pub struct LandCalculation {
    pub id: LandCalculationId,
    pub target_carbon_sequestration: f64,
    pub land_type: LandType,
    pub soil_condition: SoilCondition,
    pub project_duration: f64,
    pub result: LandRequirement,
    pub created_at: DateTime<Utc>,
}
