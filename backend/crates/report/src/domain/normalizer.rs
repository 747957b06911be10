//! Unit Normalizer
//!
//! Turns one stored record into `(pollutant, metric tons)` pairs. Stored
//! values are plain numbers, `{value, unit}` objects or strings with a unit
//! suffix. Anything unreadable contributes zero and is logged.

use emission::models::{
    CoalBurnPayload, ElectricityPayload, EmissionPayload, ExplosionPayload, FuelCombustionPayload,
    Measurement, MethanePayload, PollutantTable, ShippingPayload,
};
use emission::EmissionRecord;
use kernel::lenient::float_prefix;

/// Mass units that appear in stored payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Tons,
    Kilograms,
    Grams,
}

impl MassUnit {
    pub fn to_tons(self, value: f64) -> f64 {
        match self {
            Self::Tons => value,
            Self::Kilograms => value / 1_000.0,
            Self::Grams => value / 1_000_000.0,
        }
    }

    /// Unit named by the first word of `text` (`"kg/day"`, `"12.3400 tons"`)
    pub fn detect(text: &str) -> Option<Self> {
        let word = text
            .chars()
            .skip_while(|c| !c.is_ascii_alphabetic())
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();
        match word.as_str() {
            "t" | "ton" | "tons" | "tonne" | "tonnes" | "mt" | "metric" => Some(Self::Tons),
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(Self::Kilograms),
            "g" | "gram" | "grams" => Some(Self::Grams),
            _ => None,
        }
    }
}

/// Read a number out of text by dropping everything except digits, `.` and `-`
pub fn strip_to_number(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    float_prefix(&kept)
}

fn number_in(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => strip_to_number(s),
        _ => None,
    }
}

fn unreadable(pollutant: &str, raw: &dyn std::fmt::Display) -> f64 {
    tracing::warn!(pollutant, value = %raw, "Unreadable emission value counted as zero");
    0.0
}

/// Tons in a `{value, unit}` measurement; the unit field wins over a suffix
fn measurement_tons(pollutant: &str, measurement: &Measurement, fallback: MassUnit) -> f64 {
    let unit = measurement
        .unit
        .as_deref()
        .and_then(MassUnit::detect)
        .or_else(|| measurement.value.as_str().and_then(MassUnit::detect))
        .unwrap_or(fallback);
    match number_in(&measurement.value) {
        Some(value) => unit.to_tons(value),
        None => unreadable(pollutant, &measurement.value),
    }
}

/// Tons in a suffixed string such as `"45.6 kg"`
fn text_tons(pollutant: &str, text: &str, fallback: MassUnit) -> f64 {
    let unit = MassUnit::detect(text).unwrap_or(fallback);
    match strip_to_number(text) {
        Some(value) => unit.to_tons(value),
        None => unreadable(pollutant, &text),
    }
}

fn flat_tons(pollutant: &str, value: f64, unit: MassUnit) -> f64 {
    if value.is_finite() {
        unit.to_tons(value)
    } else {
        unreadable(pollutant, &value)
    }
}

fn table(result: &PollutantTable, fallback: MassUnit) -> Vec<(String, f64)> {
    result
        .iter()
        .map(|(pollutant, m)| (pollutant.to_string(), measurement_tons(pollutant, m, fallback)))
        .collect()
}

/// Provider amounts, kilograms per day unless the unit says otherwise
pub fn electricity(payload: &ElectricityPayload) -> Vec<(String, f64)> {
    table(&payload.result, MassUnit::Kilograms)
}

pub fn fuel_combustion(payload: &FuelCombustionPayload) -> Vec<(String, f64)> {
    table(&payload.result, MassUnit::Kilograms)
}

/// CO2 from the kilogram figure of the estimate
pub fn shipping(payload: &ShippingPayload) -> Vec<(String, f64)> {
    let kilograms = &payload.result.carbon_emissions.kilograms;
    vec![(
        "CO2".to_string(),
        text_tons("CO2", kilograms, MassUnit::Kilograms),
    )]
}

/// `"<value> tons"` per pollutant
pub fn explosion(payload: &ExplosionPayload) -> Vec<(String, f64)> {
    payload
        .emissions
        .iter()
        .map(|(pollutant, text)| (pollutant.clone(), text_tons(pollutant, text, MassUnit::Tons)))
        .collect()
}

pub fn coal_burn(payload: &CoalBurnPayload) -> Vec<(String, f64)> {
    vec![(
        "CO2".to_string(),
        flat_tons("CO2", payload.co2_emissions, MassUnit::Kilograms),
    )]
}

pub fn methane(payload: &MethanePayload) -> Vec<(String, f64)> {
    vec![(
        "CH4".to_string(),
        flat_tons("CH4", payload.total_methane, MassUnit::Kilograms),
    )]
}

/// Pairs for one record; a record whose payload no longer decodes yields none
pub fn normalize(record: &EmissionRecord) -> Vec<(String, f64)> {
    match &record.payload {
        Some(EmissionPayload::Electricity(p)) => electricity(p),
        Some(EmissionPayload::FuelCombustion(p)) => fuel_combustion(p),
        Some(EmissionPayload::Shipping(p)) => shipping(p),
        Some(EmissionPayload::Explosion(p)) => explosion(p),
        Some(EmissionPayload::CoalBurn(p)) => coal_burn(p),
        Some(EmissionPayload::Methane(p)) => methane(p),
        None => Vec::new(),
    }
}

/// Pollutants the impact score weighs
pub const SCORED_POLLUTANTS: [&str; 4] = ["CO2", "CO", "H2S", "NOx"];

fn stored_number(pollutant: &str, value: Option<f64>) -> Option<(String, f64)> {
    value.map(|v| (pollutant.to_string(), v))
}

/// Scored pollutants as the numbers stored on the record, without unit
/// conversion. Only electricity, fuel combustion, shipping and explosion
/// records are scored; coal and methane yield nothing.
pub fn stored_amounts(record: &EmissionRecord) -> Vec<(String, f64)> {
    let co2_in = |result: &PollutantTable| {
        stored_number("CO2", result.get("CO2").and_then(|m| number_in(&m.value)))
    };
    match &record.payload {
        Some(EmissionPayload::Electricity(p)) => co2_in(&p.result).into_iter().collect(),
        Some(EmissionPayload::FuelCombustion(p)) => co2_in(&p.result).into_iter().collect(),
        Some(EmissionPayload::Shipping(p)) => stored_number(
            "CO2",
            strip_to_number(&p.result.carbon_emissions.kilograms),
        )
        .into_iter()
        .collect(),
        Some(EmissionPayload::Explosion(p)) => SCORED_POLLUTANTS
            .iter()
            .filter_map(|&pollutant| {
                let text = p.emissions.get(pollutant)?;
                stored_number(pollutant, strip_to_number(text))
            })
            .collect(),
        Some(EmissionPayload::CoalBurn(_) | EmissionPayload::Methane(_)) | None => Vec::new(),
    }
}
