//! Summary Builder
//!
//! Combines category totals and sink absorption into the figures a report
//! is written from. All masses are metric tons except the impact basis,
//! which keeps stored numbers unconverted.

use std::collections::BTreeMap;
use std::fmt;

use emission::{CategoryRecords, EmissionCategory};
use kernel::time_window::TimeWindow;
use serde::Serialize;
use sink::CarbonSink;

use crate::domain::aggregator::CategoryTotals;
use crate::domain::normalizer::{SCORED_POLLUTANTS, stored_amounts};
use crate::domain::source::{DataSource, WindowData};

const SCORED_CATEGORIES: [EmissionCategory; 4] = [
    EmissionCategory::Electricity,
    EmissionCategory::FuelCombustion,
    EmissionCategory::Shipping,
    EmissionCategory::Explosion,
];

// Weights apply to stored numbers as-is: kilograms for electricity, fuel
// and shipping CO2, tons for explosion pollutants.
const CO2_WEIGHT: f64 = 10_000.0;
const CO_WEIGHT: f64 = 500.0;
const H2S_WEIGHT: f64 = 100.0;
const NOX_WEIGHT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl ImpactLevel {
    /// Strictly greater than 10, 5 and 2 respectively
    pub fn classify(score: f64) -> Self {
        if score > 10.0 {
            Self::Critical
        } else if score > 5.0 {
            Self::High
        } else if score > 2.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored amounts of the scored pollutants across the scored categories
pub fn impact_basis(records: &CategoryRecords) -> BTreeMap<String, f64> {
    let mut basis: BTreeMap<String, f64> = SCORED_POLLUTANTS
        .iter()
        .map(|p| (p.to_string(), 0.0))
        .collect();
    for category in SCORED_CATEGORIES {
        for (pollutant, value) in records.get(category).iter().flat_map(stored_amounts) {
            *basis.entry(pollutant).or_insert(0.0) += value;
        }
    }
    basis
}

/// Weighted score over an [`impact_basis`]
pub fn impact_score(basis: &BTreeMap<String, f64>) -> f64 {
    let stored = |pollutant: &str| basis.get(pollutant).copied().unwrap_or(0.0);
    stored("CO2") / CO2_WEIGHT + stored("CO") / CO_WEIGHT + stored("H2S") / H2S_WEIGHT
        + stored("NOx") / NOX_WEIGHT
}

/// Tons of CO2 absorbed per day by all sinks
pub fn sink_absorption(sinks: &[CarbonSink]) -> f64 {
    sinks.iter().map(CarbonSink::daily_absorption).sum()
}

/// CO2 of the five sources offset by sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2BySource {
    pub electricity: f64,
    pub explosion: f64,
    pub fuel_combustion: f64,
    pub shipping: f64,
    pub coal: f64,
    pub total: f64,
}

impl Co2BySource {
    pub fn from_totals(totals: &CategoryTotals) -> Self {
        let electricity = totals.electricity.get("CO2");
        let explosion = totals.explosion.get("CO2");
        let fuel_combustion = totals.fuel_combustion.get("CO2");
        let shipping = totals.shipping.get("CO2");
        let coal = totals.coal_burn.get("CO2");
        Self {
            electricity,
            explosion,
            fuel_combustion,
            shipping,
            coal,
            total: electricity + explosion + fuel_combustion + shipping + coal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionSummary {
    pub window: TimeWindow,
    pub categories: CategoryTotals,
    pub grand_total: BTreeMap<String, f64>,
    pub co2_by_source: Co2BySource,
    pub sink_count: usize,
    /// Tons of CO2 per day
    pub sink_absorption: f64,
    /// `co2_by_source.total - sink_absorption`; negative when sinks dominate
    pub net_emissions: f64,
    /// Unconverted amounts the score is computed from
    pub impact_basis: BTreeMap<String, f64>,
    pub impact_score: f64,
    pub impact_level: ImpactLevel,
    pub failed_sources: Vec<DataSource>,
}

impl EmissionSummary {
    pub fn build(window: TimeWindow, data: &WindowData) -> Self {
        let categories = CategoryTotals::from_records(&data.records);
        let grand_total = categories.grand_total();
        let co2_by_source = Co2BySource::from_totals(&categories);
        let absorption = sink_absorption(&data.sinks);
        let basis = impact_basis(&data.records);
        let score = impact_score(&basis);

        Self {
            window,
            grand_total,
            co2_by_source,
            sink_count: data.sinks.len(),
            sink_absorption: absorption,
            net_emissions: co2_by_source.total - absorption,
            impact_basis: basis,
            impact_score: score,
            impact_level: ImpactLevel::classify(score),
            failed_sources: data.failed_sources.clone(),
            categories,
        }
    }

    /// Tons of a pollutant across all categories
    pub fn total_of(&self, pollutant: &str) -> f64 {
        self.grand_total.get(pollutant).copied().unwrap_or(0.0)
    }
}
