//! Domain Entities
//!
//! An [`EmissionRecord`] is written once per calculation and never updated.
//! Its payload is one explicit variant per category; the stored JSON keeps
//! the field names clients already consume.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::id::EmissionRecordId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::AtmosphericConditions;

/// Record categories, in response order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmissionCategory {
    Electricity,
    FuelCombustion,
    Shipping,
    Explosion,
    CoalBurn,
    Methane,
}

impl EmissionCategory {
    pub const ALL: [EmissionCategory; 6] = [
        Self::Electricity,
        Self::FuelCombustion,
        Self::Shipping,
        Self::Explosion,
        Self::CoalBurn,
        Self::Methane,
    ];

    /// JSON key and database tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::FuelCombustion => "fuelCombustion",
            Self::Shipping => "shipping",
            Self::Explosion => "explosion",
            Self::CoalBurn => "coalBurn",
            Self::Methane => "methane",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl std::fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pollutant amount as reported by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Usually a number; older rows may hold a string
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value: serde_json::Value::from(value),
            unit: Some(unit.into()),
        }
    }
}

/// Pollutant type → measurement.
///
/// Serialized as an object; decodes from an object or from a list of
/// `[key, value]` pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PollutantTable(BTreeMap<String, Measurement>);

impl PollutantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pollutant: impl Into<String>, measurement: Measurement) {
        self.0.insert(pollutant.into(), measurement);
    }

    pub fn get(&self, pollutant: &str) -> Option<&Measurement> {
        self.0.get(pollutant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Measurement)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Measurement)> for PollutantTable {
    fn from_iter<I: IntoIterator<Item = (String, Measurement)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for PollutantTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Map(BTreeMap<String, Measurement>),
            Pairs(Vec<(String, Measurement)>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Map(map) => Self(map),
            Repr::Pairs(pairs) => pairs.into_iter().collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectricityPayload {
    pub state_name: String,
    pub energy_per_time: f64,
    pub responsible_area: f64,
    pub total_area: f64,
    /// Daily amounts in `kg/day`
    pub result: PollutantTable,
}

/// Pollutant keys kept from the fuel methodology response
pub const FUEL_POLLUTANTS: [&str; 6] = [
    "CO2",
    "nitrousOxideCO2e",
    "methaneCO2e",
    "totalDirectCO2e",
    "indirectCO2e",
    "lifeCycleCO2e",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuelCombustionPayload {
    pub fuel: String,
    pub quantity_fuel_consumed: f64,
    pub result: PollutantTable,
}

/// Carbon estimate rendered as suffixed strings (`"45.6 kg"`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarbonEmissions {
    pub grams: String,
    pub kilograms: String,
    pub metric_tonnes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingResult {
    pub distance: String,
    pub weight: String,
    pub carbon_emissions: CarbonEmissions,
}

/// Shipping keeps the provider's snake_case request fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingPayload {
    pub weight_unit: String,
    pub weight_value: f64,
    pub distance_unit: String,
    pub distance_value: f64,
    pub transport_method: String,
    pub result: ShippingResult,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplosionPayload {
    pub explosive_type: String,
    pub amount: f64,
    /// Pollutant → `"<value> tons"`
    pub emissions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoalBurnPayload {
    pub coal_type: String,
    pub coal_consumption: f64,
    pub emission_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_oxidation_factor: Option<f64>,
    /// Kilograms of CO2
    pub co2_emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethanePayload {
    pub mining_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_coal_production: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_emission_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underground_coal_production: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underground_emission_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventilation_emissions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degasification_emissions: Option<f64>,
    pub atmospheric_conditions: AtmosphericConditions,
    /// Kilograms of CH4
    pub total_methane: f64,
}

/// Category-specific body of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmissionPayload {
    Electricity(ElectricityPayload),
    FuelCombustion(FuelCombustionPayload),
    Shipping(ShippingPayload),
    Explosion(ExplosionPayload),
    CoalBurn(CoalBurnPayload),
    Methane(MethanePayload),
}

impl EmissionPayload {
    pub fn category(&self) -> EmissionCategory {
        match self {
            Self::Electricity(_) => EmissionCategory::Electricity,
            Self::FuelCombustion(_) => EmissionCategory::FuelCombustion,
            Self::Shipping(_) => EmissionCategory::Shipping,
            Self::Explosion(_) => EmissionCategory::Explosion,
            Self::CoalBurn(_) => EmissionCategory::CoalBurn,
            Self::Methane(_) => EmissionCategory::Methane,
        }
    }

    /// Decode a stored payload; the category decides the shape
    pub fn from_json(
        category: EmissionCategory,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            EmissionCategory::Electricity => Self::Electricity(serde_json::from_value(value)?),
            EmissionCategory::FuelCombustion => {
                Self::FuelCombustion(serde_json::from_value(value)?)
            }
            EmissionCategory::Shipping => Self::Shipping(serde_json::from_value(value)?),
            EmissionCategory::Explosion => Self::Explosion(serde_json::from_value(value)?),
            EmissionCategory::CoalBurn => Self::CoalBurn(serde_json::from_value(value)?),
            EmissionCategory::Methane => Self::Methane(serde_json::from_value(value)?),
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// A persisted calculation.
///
/// `payload` is `None` when a stored row no longer decodes; the record still
/// counts toward its category but contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRecord {
    pub id: EmissionRecordId,
    pub category: EmissionCategory,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Option<EmissionPayload>,
}

impl EmissionRecord {
    pub fn new(payload: EmissionPayload) -> Self {
        Self::new_at(payload, Utc::now())
    }

    pub fn new_at(payload: EmissionPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EmissionRecordId::new(),
            category: payload.category(),
            created_at,
            payload: Some(payload),
        }
    }
}

/// Records of one window, grouped by category, each ordered by creation time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecords {
    pub electricity: Vec<EmissionRecord>,
    pub fuel_combustion: Vec<EmissionRecord>,
    pub shipping: Vec<EmissionRecord>,
    pub explosion: Vec<EmissionRecord>,
    pub coal_burn: Vec<EmissionRecord>,
    pub methane: Vec<EmissionRecord>,
}

impl CategoryRecords {
    pub fn get(&self, category: EmissionCategory) -> &[EmissionRecord] {
        match category {
            EmissionCategory::Electricity => &self.electricity,
            EmissionCategory::FuelCombustion => &self.fuel_combustion,
            EmissionCategory::Shipping => &self.shipping,
            EmissionCategory::Explosion => &self.explosion,
            EmissionCategory::CoalBurn => &self.coal_burn,
            EmissionCategory::Methane => &self.methane,
        }
    }

    pub fn get_mut(&mut self, category: EmissionCategory) -> &mut Vec<EmissionRecord> {
        match category {
            EmissionCategory::Electricity => &mut self.electricity,
            EmissionCategory::FuelCombustion => &mut self.fuel_combustion,
            EmissionCategory::Shipping => &mut self.shipping,
            EmissionCategory::Explosion => &mut self.explosion,
            EmissionCategory::CoalBurn => &mut self.coal_burn,
            EmissionCategory::Methane => &mut self.methane,
        }
    }

    pub fn total_len(&self) -> usize {
        EmissionCategory::ALL
            .into_iter()
            .map(|c| self.get(c).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pollutant_table_decodes_map_and_pairs() {
        let from_map: PollutantTable = serde_json::from_value(json!({
            "CO2": { "value": 12.5, "unit": "kg/day" }
        }))
        .unwrap();
        let from_pairs: PollutantTable = serde_json::from_value(json!([
            ["CO2", { "value": 12.5, "unit": "kg/day" }]
        ]))
        .unwrap();
        assert_eq!(from_map, from_pairs);
        assert_eq!(from_map.get("CO2").unwrap().value, json!(12.5));
    }

    #[test]
    fn test_payload_decoding_follows_category() {
        let stored = json!({
            "coalType": "Lignite",
            "coalConsumption": 1000.0,
            "emissionFactor": 0.95,
            "co2Emissions": 940.5
        });
        let payload = EmissionPayload::from_json(EmissionCategory::CoalBurn, stored).unwrap();
        match payload {
            EmissionPayload::CoalBurn(coal) => {
                assert_eq!(coal.co2_emissions, 940.5);
                assert_eq!(coal.carbon_oxidation_factor, None);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_payload_decoding_rejects_wrong_types() {
        let stored = json!({ "co2Emissions": "lots" });
        assert!(EmissionPayload::from_json(EmissionCategory::CoalBurn, stored).is_err());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = EmissionRecord::new(EmissionPayload::Explosion(ExplosionPayload {
            explosive_type: "ANFO".to_string(),
            amount: 1000.0,
            emissions: BTreeMap::from([("CO".to_string(), "0.0340 tons".to_string())]),
        }));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "explosion");
        assert_eq!(json["explosiveType"], "ANFO");
        assert_eq!(json["emissions"]["CO"], "0.0340 tons");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_category_tags() {
        for category in EmissionCategory::ALL {
            assert_eq!(EmissionCategory::from_tag(category.as_str()), Some(category));
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                json!(category.as_str())
            );
        }
    }
}
