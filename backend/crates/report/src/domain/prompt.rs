//! Prompt assembly for the narrative providers

use std::fmt::Write;

use crate::domain::summary::EmissionSummary;

fn failed_note(summary: &EmissionSummary) -> String {
    if summary.failed_sources.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = summary.failed_sources.iter().map(|s| s.as_str()).collect();
    format!(
        "\nNote: data for {} could not be loaded and is counted as zero.\n",
        names.join(", ")
    )
}

/// Prompt for the periodic environmental impact report
pub fn environmental_report(range_label: &str, summary: &EmissionSummary) -> String {
    let c = &summary.categories;
    let co2 = &summary.co2_by_source;
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Generate a comprehensive {} environmental impact report for a mining operation \
         based on the following data.",
        range_label.to_lowercase()
    );
    let sources = [
        ("Electricity", c.electricity.count, co2.electricity),
        ("Explosives", c.explosion.count, co2.explosion),
        ("Fuel Combustion", c.fuel_combustion.count, co2.fuel_combustion),
        ("Shipping", c.shipping.count, co2.shipping),
        ("Coal Burning", c.coal_burn.count, co2.coal),
    ];
    for (i, (name, count, tons)) in sources.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "\n{}. {} Emissions:\n- Total Entries: {}\n- Total CO2 Emissions: {:.2} metric tons CO2e\n\
             - Raw Emissions Value: {:.2} kg CO2e",
            i + 1,
            name,
            count,
            tons,
            tons * 1_000.0
        );
    }
    let _ = writeln!(
        prompt,
        "\n6. Methane:\n- Total Entries: {}\n- Total CH4: {:.2} metric tons",
        c.methane.count,
        summary.total_of("CH4")
    );
    let _ = writeln!(
        prompt,
        "\n7. Carbon Sinks:\n- Total Entries: {}\n- Total Daily Carbon Sequestration: {:.2} tonnes CO2e",
        summary.sink_count, summary.sink_absorption
    );
    let _ = writeln!(
        prompt,
        "\nSummary Metrics:\n- Total Combined Emissions: {:.2} metric tons CO2e\n\
         - Net Emissions after sinks: {:.2} metric tons CO2e\n- Impact Level: {}",
        co2.total, summary.net_emissions, summary.impact_level
    );
    prompt.push_str(&failed_note(summary));
    prompt.push_str(
        "\nPlease provide a detailed report including:\n\
         - A detailed analysis of each emission source\n\
         - Carbon sinks: how much of the emission the current sinks cover and how much more \
           sink area is needed to neutralize the rest\n\
         - Comparative analysis, trends and patterns\n\
         - Land use and ecosystem impact\n\
         - Economic and strategic implications\n\
         - Strategic recommendations for the immediate, medium and long term\n\
         - A conclusion\n\n\
         Format the report in a clear, structured manner with headings and subheadings, \
         separating sections with blank lines.",
    );
    prompt
}

/// Prompt for the forensic analysis of an explicit date range
pub fn forensic_analysis(start_date: &str, end_date: &str, summary: &EmissionSummary) -> String {
    let c = &summary.categories;
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an environmental forensics expert analyzing emissions data from {start_date} to \
         {end_date}. Produce a scientifically precise environmental impact report grounded in the \
         data below, attributing harm directly to specific emission sources."
    );
    let _ = writeln!(
        prompt,
        "\n**Emission Impact Summary:**\n- Impact Level: {}\n- Total Emissions:\n  \
         * CO2: {:.2} tons\n  * CO: {:.2} tons\n  * H2S: {:.2} tons\n  * NOx: {:.2} tons",
        summary.impact_level,
        summary.total_of("CO2"),
        summary.total_of("CO"),
        summary.total_of("H2S"),
        summary.total_of("NOx"),
    );
    prompt.push_str("\n**Emission Source Breakdown:**\n");
    let sources = [
        ("Electricity", &c.electricity),
        ("Fuel Combustion", &c.fuel_combustion),
        ("Shipping", &c.shipping),
        ("Explosion", &c.explosion),
        ("Coal Burning", &c.coal_burn),
    ];
    for (name, total) in sources {
        let _ = writeln!(
            prompt,
            "- {name} Emissions: {} events\n  * CO2: {:.2} tons",
            total.count,
            total.get("CO2")
        );
    }
    let _ = writeln!(
        prompt,
        "- Sinks absorb {:.2} tons of CO2 per day; net emissions are {:.2} tons",
        summary.sink_absorption, summary.net_emissions
    );
    prompt.push_str(&failed_note(summary));
    prompt.push_str(
        "\n**Response Format:**\n\
         - Biodiversity Hazard: [damage to local flora and fauna and the emission responsible]\n\
         - Ozone Layer Depletion: [contribution of NOx and CO2]\n\
         - Soil and Water Contamination: [contamination from H2S and other emissions]\n\
         - Heat Island Effect: [heat pockets from elevated CO2]\n\
         - Climate Refugees: [estimated displacement given the severity]\n\
         - Public Health Hazards: [risks from NOx, CO and other emissions]\n\
         - Agricultural Disruption: [crop damage from contamination or temperature change]\n\
         - Weather Impact: [long-term shifts in weather patterns]\n\n\
         Be concise and base every conclusion on the data provided. Group the findings under a \
         bold heading per emission source and give a reason for every impact listed.",
    );
    prompt
}
