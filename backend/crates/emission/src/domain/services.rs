//! Domain Services
//!
//! Local emission formulas. Pure functions; the use cases persist results.

use std::collections::BTreeMap;

use crate::domain::value_objects::{AtmosphericConditions, CoalType, ExplosiveType, MiningType};
use crate::error::{EmissionError, EmissionResult};

/// Pollutants reported for every explosion, in factor-table order
pub const EXPLOSION_POLLUTANTS: [&str; 7] = ["CO", "NOx", "NH3", "HCN", "H2S", "SO2", "CO2"];

/// Share of carbon oxidised during combustion
pub const CARBON_OXIDATION_FACTOR: f64 = 0.99;

/// Grams of pollutant per ton of explosive; absent pollutants are 0
pub fn explosion_factor(explosive: ExplosiveType, pollutant: &str) -> f64 {
    use ExplosiveType::*;
    match (explosive, pollutant) {
        (BlackPowder, "CO") => 85.0,
        (BlackPowder, "H2S") => 12.0,
        (BlackPowder, "CO2") => 3100.0,
        (SmokelessPowder, "CO") => 38.0,
        (SmokelessPowder, "H2S") => 10.0,
        (SmokelessPowder, "CO2") => 38.0,
        (DynamiteStraight, "CO") => 141.0,
        (DynamiteStraight, "H2S") => 3.0,
        (DynamiteStraight, "CO2") => 2320.0,
        (DynamiteAmmonia, "CO") => 32.0,
        (DynamiteAmmonia, "H2S") => 16.0,
        (DynamiteAmmonia, "CO2") => 32.0,
        (DynamiteGelatin, "CO") => 52.0,
        (DynamiteGelatin, "NOx") => 26.0,
        (DynamiteGelatin, "SO2") => 1.0,
        (DynamiteGelatin, "CO2") => 52.0,
        (Anfo, "CO") => 34.0,
        (Anfo, "NOx") => 8.0,
        (Anfo, "SO2") => 1.0,
        (Anfo, "CO2") => 34.0,
        (Tnt, "CO") => 398.0,
        (Tnt, "NH3") => 14.0,
        (Tnt, "HCN") => 13.0,
        (Tnt, "CO2") => 1360.0,
        (Rdx, "CO") => 98.0,
        (Rdx, "NH3") => 22.0,
        (Rdx, "CO2") => 1190.0,
        (Petn, "CO") => 149.0,
        (Petn, "NH3") => 1.3,
        (Petn, "CO2") => 696.0,
        _ => 0.0,
    }
}

/// Every tracked pollutant as `"<tons, 4 decimals> tons"`
pub fn explosion_emissions(explosive: ExplosiveType, amount: f64) -> BTreeMap<String, String> {
    EXPLOSION_POLLUTANTS
        .iter()
        .map(|&pollutant| {
            let tons = amount * explosion_factor(explosive, pollutant) / 1e6;
            (pollutant.to_string(), format!("{tons:.4} tons"))
        })
        .collect()
}

/// CO2 from burning `consumption` of the given coal
pub fn coal_co2_emissions(coal: CoalType, consumption: f64) -> f64 {
    consumption * coal.emission_factor() * CARBON_OXIDATION_FACTOR
}

/// Emission factor scaled by temperature (1%/°C above 25), humidity
/// (0.5%/point) and pressure (0.01%/Pa)
pub fn adjusted_methane_factor(factor: f64, conditions: &AtmosphericConditions) -> f64 {
    factor
        * (1.0 + (conditions.temperature - 25.0) * 0.01)
        * (1.0 + conditions.humidity * 0.005)
        * (1.0 + conditions.pressure * 0.0001)
}

/// Inputs for one methane estimate; which fields matter depends on the mine
#[derive(Debug, Clone, Copy, Default)]
pub struct MethaneInputs {
    pub coal_production: Option<f64>,
    pub emission_factor: Option<f64>,
    pub ventilation_emissions: Option<f64>,
    pub degasification_emissions: Option<f64>,
}

/// Total CH4 for the mine.
///
/// Surface: production × adjusted factor. Underground additionally adds the
/// ventilation and degasification emissions.
pub fn total_methane(
    mining: MiningType,
    inputs: &MethaneInputs,
    conditions: &AtmosphericConditions,
) -> EmissionResult<f64> {
    let production = require(inputs.coal_production, "coal production")?;
    let factor = require(inputs.emission_factor, "emission factor")?;
    let base = production * adjusted_methane_factor(factor, conditions);

    match mining {
        MiningType::Surface => Ok(base),
        MiningType::Underground => {
            let ventilation = require(inputs.ventilation_emissions, "ventilation emissions")?;
            let degasification =
                require(inputs.degasification_emissions, "degasification emissions")?;
            Ok(base + ventilation + degasification)
        }
    }
}

fn require(value: Option<f64>, name: &str) -> EmissionResult<f64> {
    value.ok_or_else(|| EmissionError::invalid_input(format!("Missing required input: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_explosion_emissions_anfo() {
        let emissions = explosion_emissions(ExplosiveType::Anfo, 1000.0);
        assert_eq!(emissions.len(), 7);
        assert_eq!(emissions["CO"], "0.0340 tons");
        assert_eq!(emissions["NOx"], "0.0080 tons");
        assert_eq!(emissions["SO2"], "0.0010 tons");
        assert_eq!(emissions["CO2"], "0.0340 tons");
        assert_eq!(emissions["NH3"], "0.0000 tons");
        assert_eq!(emissions["HCN"], "0.0000 tons");
        assert_eq!(emissions["H2S"], "0.0000 tons");
    }

    #[test]
    fn test_explosion_emissions_black_powder() {
        let emissions = explosion_emissions(ExplosiveType::BlackPowder, 2000.0);
        assert_eq!(emissions["CO2"], "6.2000 tons");
        assert_eq!(emissions["H2S"], "0.0240 tons");
    }

    #[test]
    fn test_petn_fractional_factor() {
        assert_eq!(explosion_factor(ExplosiveType::Petn, "NH3"), 1.3);
        let emissions = explosion_emissions(ExplosiveType::Petn, 10_000.0);
        assert_eq!(emissions["NH3"], "0.0130 tons");
    }

    #[test]
    fn test_coal_co2() {
        assert!(approx(coal_co2_emissions(CoalType::Lignite, 1000.0), 940.5));
        assert!(approx(coal_co2_emissions(CoalType::Anthracite, 100.0), 108.9));
    }

    #[test]
    fn test_adjusted_factor_neutral_conditions() {
        let neutral = AtmosphericConditions {
            temperature: 25.0,
            humidity: 0.0,
            pressure: 0.0,
        };
        assert!(approx(adjusted_methane_factor(2.0, &neutral), 2.0));
    }

    #[test]
    fn test_surface_and_underground_methane() {
        let conditions = AtmosphericConditions {
            temperature: 35.0,
            humidity: 20.0,
            pressure: 100.0,
        };
        // 1.1 * 1.1 * 1.01 = 1.2221
        let inputs = MethaneInputs {
            coal_production: Some(100.0),
            emission_factor: Some(1.0),
            ventilation_emissions: Some(5.0),
            degasification_emissions: Some(2.0),
        };
        let surface = total_methane(MiningType::Surface, &inputs, &conditions).unwrap();
        assert!(approx(surface, 122.21));
        let underground = total_methane(MiningType::Underground, &inputs, &conditions).unwrap();
        assert!(approx(underground, 129.21));
    }

    #[test]
    fn test_underground_requires_extra_inputs() {
        let inputs = MethaneInputs {
            coal_production: Some(100.0),
            emission_factor: Some(1.0),
            ..Default::default()
        };
        let conditions = AtmosphericConditions::default();
        assert!(total_methane(MiningType::Surface, &inputs, &conditions).is_ok());
        assert!(matches!(
            total_methane(MiningType::Underground, &inputs, &conditions),
            Err(EmissionError::InvalidInput(_))
        ));
    }
}
