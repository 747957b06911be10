//! Domain Value Objects
//!
//! Closed vocabularies for the local calculators.

use serde::{Deserialize, Serialize};

use crate::error::EmissionError;

pub use kernel::lenient::lenient_number;

/// Explosives with a known emission factor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplosiveType {
    BlackPowder,
    SmokelessPowder,
    DynamiteStraight,
    DynamiteAmmonia,
    DynamiteGelatin,
    Anfo,
    Tnt,
    Rdx,
    Petn,
}

impl ExplosiveType {
    pub const ALL: [ExplosiveType; 9] = [
        Self::BlackPowder,
        Self::SmokelessPowder,
        Self::DynamiteStraight,
        Self::DynamiteAmmonia,
        Self::DynamiteGelatin,
        Self::Anfo,
        Self::Tnt,
        Self::Rdx,
        Self::Petn,
    ];

    /// Name as accepted on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlackPowder => "Black powder",
            Self::SmokelessPowder => "Smokeless powder",
            Self::DynamiteStraight => "Dynamite, straight",
            Self::DynamiteAmmonia => "Dynamite, ammonia",
            Self::DynamiteGelatin => "Dynamite, gelatin",
            Self::Anfo => "ANFO",
            Self::Tnt => "TNT",
            Self::Rdx => "RDX",
            Self::Petn => "PETN",
        }
    }
}

impl std::str::FromStr for ExplosiveType {
    type Err = EmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(EmissionError::InvalidExplosiveType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoalType {
    Lignite,
    SubBituminous,
    Bituminous,
    Anthracite,
}

impl CoalType {
    pub const ALL: [CoalType; 4] = [
        Self::Lignite,
        Self::SubBituminous,
        Self::Bituminous,
        Self::Anthracite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lignite => "Lignite",
            Self::SubBituminous => "Sub-bituminous",
            Self::Bituminous => "Bituminous",
            Self::Anthracite => "Anthracite",
        }
    }

    /// CO2 emission factor per unit of coal burned
    pub fn emission_factor(&self) -> f64 {
        match self {
            Self::Lignite => 0.95,
            Self::SubBituminous => 0.90,
            Self::Bituminous => 1.00,
            Self::Anthracite => 1.10,
        }
    }
}

impl std::str::FromStr for CoalType {
    type Err = EmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(EmissionError::InvalidCoalType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiningType {
    Surface,
    Underground,
}

impl MiningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "Surface",
            Self::Underground => "Underground",
        }
    }
}

impl std::str::FromStr for MiningType {
    type Err = EmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Surface" => Ok(Self::Surface),
            "Underground" => Ok(Self::Underground),
            _ => Err(EmissionError::InvalidMiningType),
        }
    }
}

/// Site conditions that scale the methane emission factor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AtmosphericConditions {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Pascal
    pub pressure: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosive_type_round_trips_names() {
        for t in ExplosiveType::ALL {
            assert_eq!(t.as_str().parse::<ExplosiveType>().unwrap(), t);
        }
        assert!("C4".parse::<ExplosiveType>().is_err());
        assert!("anfo".parse::<ExplosiveType>().is_err(), "names are case-sensitive");
    }

    #[test]
    fn test_coal_factors() {
        assert_eq!("Lignite".parse::<CoalType>().unwrap().emission_factor(), 0.95);
        assert_eq!("Sub-bituminous".parse::<CoalType>().unwrap().emission_factor(), 0.90);
        assert_eq!("Bituminous".parse::<CoalType>().unwrap().emission_factor(), 1.00);
        assert_eq!("Anthracite".parse::<CoalType>().unwrap().emission_factor(), 1.10);
        assert!(matches!(
            "Peat".parse::<CoalType>(),
            Err(EmissionError::InvalidCoalType)
        ));
    }

    #[test]
    fn test_mining_type() {
        assert_eq!("Surface".parse::<MiningType>().unwrap(), MiningType::Surface);
        assert_eq!("Underground".parse::<MiningType>().unwrap(), MiningType::Underground);
        assert!(matches!(
            "Open pit".parse::<MiningType>(),
            Err(EmissionError::InvalidMiningType)
        ));
    }
}
