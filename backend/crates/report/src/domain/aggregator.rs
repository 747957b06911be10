//! Category Aggregator

use std::collections::BTreeMap;

use emission::domain::services::EXPLOSION_POLLUTANTS;
use emission::{CategoryRecords, EmissionCategory, EmissionRecord};
use serde::Serialize;

use crate::domain::normalizer::normalize;

/// Pollutants always present in a category's totals, even at zero
pub fn tracked_pollutants(category: EmissionCategory) -> &'static [&'static str] {
    match category {
        EmissionCategory::Explosion => &EXPLOSION_POLLUTANTS,
        EmissionCategory::Methane => &["CH4"],
        EmissionCategory::Electricity
        | EmissionCategory::FuelCombustion
        | EmissionCategory::Shipping
        | EmissionCategory::CoalBurn => &["CO2"],
    }
}

/// Metric tons per pollutant for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Records seen, including ones that contributed nothing
    pub count: usize,
    pub pollutants: BTreeMap<String, f64>,
}

impl CategoryTotal {
    pub fn empty(category: EmissionCategory) -> Self {
        Self {
            count: 0,
            pollutants: tracked_pollutants(category)
                .iter()
                .map(|p| (p.to_string(), 0.0))
                .collect(),
        }
    }

    /// Tons of `pollutant`, zero when never seen
    pub fn get(&self, pollutant: &str) -> f64 {
        self.pollutants.get(pollutant).copied().unwrap_or(0.0)
    }

    fn add(&mut self, pollutant: String, tons: f64) {
        *self.pollutants.entry(pollutant).or_insert(0.0) += tons;
    }
}

/// Sum every record of one category
pub fn aggregate(category: EmissionCategory, records: &[EmissionRecord]) -> CategoryTotal {
    let mut total = CategoryTotal::empty(category);
    total.count = records.len();
    for (pollutant, tons) in records.iter().flat_map(normalize) {
        total.add(pollutant, tons);
    }
    total
}

/// Totals for all six categories of a window
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub electricity: CategoryTotal,
    pub fuel_combustion: CategoryTotal,
    pub shipping: CategoryTotal,
    pub explosion: CategoryTotal,
    pub coal_burn: CategoryTotal,
    pub methane: CategoryTotal,
}

impl CategoryTotals {
    pub fn from_records(records: &CategoryRecords) -> Self {
        let of = |category| aggregate(category, records.get(category));
        Self {
            electricity: of(EmissionCategory::Electricity),
            fuel_combustion: of(EmissionCategory::FuelCombustion),
            shipping: of(EmissionCategory::Shipping),
            explosion: of(EmissionCategory::Explosion),
            coal_burn: of(EmissionCategory::CoalBurn),
            methane: of(EmissionCategory::Methane),
        }
    }

    pub fn get(&self, category: EmissionCategory) -> &CategoryTotal {
        match category {
            EmissionCategory::Electricity => &self.electricity,
            EmissionCategory::FuelCombustion => &self.fuel_combustion,
            EmissionCategory::Shipping => &self.shipping,
            EmissionCategory::Explosion => &self.explosion,
            EmissionCategory::CoalBurn => &self.coal_burn,
            EmissionCategory::Methane => &self.methane,
        }
    }

    /// Sum of each pollutant across every category
    pub fn grand_total(&self) -> BTreeMap<String, f64> {
        let mut grand = BTreeMap::new();
        for category in EmissionCategory::ALL {
            for (pollutant, tons) in &self.get(category).pollutants {
                *grand.entry(pollutant.clone()).or_insert(0.0) += tons;
            }
        }
        grand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emission::models::{CoalBurnPayload, EmissionPayload};

    fn coal(kg: f64) -> EmissionRecord {
        EmissionRecord::new(EmissionPayload::CoalBurn(CoalBurnPayload {
            co2_emissions: kg,
            ..Default::default()
        }))
    }

    #[test]
    fn test_empty_category_is_zero() {
        let total = aggregate(EmissionCategory::Explosion, &[]);
        assert_eq!(total.count, 0);
        assert_eq!(total.pollutants.len(), EXPLOSION_POLLUTANTS.len());
        assert!(total.pollutants.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_sums_and_counts_every_record() {
        let mut broken = coal(0.0);
        broken.payload = None;
        let total = aggregate(EmissionCategory::CoalBurn, &[coal(500.0), coal(250.0), broken]);
        assert_eq!(total.count, 3);
        assert_eq!(total.get("CO2"), 0.75);
    }

    #[test]
    fn test_grand_total_spans_categories() {
        let records = CategoryRecords {
            coal_burn: vec![coal(1000.0)],
            ..Default::default()
        };
        let totals = CategoryTotals::from_records(&records);
        let grand = totals.grand_total();
        assert_eq!(grand["CO2"], 1.0);
        assert_eq!(grand["CH4"], 0.0);
        assert_eq!(totals.electricity.count, 0);
    }
}
