//! Shared loading and output plumbing for the simulation commands.

use anyhow::{anyhow, Result};
use serde::Serialize;

use trade_sim_core::FlowDirection;
use trade_sim_data::{load_flows, CentroidTable, FlowRecordEnricher};
use trade_sim_engine::{Baseline, ElasticityProfiles};

/// Loads the flow feed, enriches it, and derives the baseline arc set and
/// elasticity profiles every simulation command starts from.
pub fn load_simulation_data(
    flows_path: &str,
    centroids_path: Option<&str>,
) -> Result<(Baseline, ElasticityProfiles)> {
    let centroids = match centroids_path {
        Some(path) => CentroidTable::from_path(path)?,
        None => CentroidTable::builtin(),
    };

    let records = load_flows(flows_path)?;
    let enriched = FlowRecordEnricher::new(&centroids).enrich(records);

    let baseline = Baseline::from_flows(&enriched);
    let profiles = ElasticityProfiles::from_flows(&enriched);

    Ok((baseline, profiles))
}

/// Output format for command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Prints the report in the requested format and optionally writes the JSON
/// form to a file.
pub fn emit<T: Serialize>(
    report: &T,
    text: &str,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json)?;
        tracing::info!("Report written to {}", path);
    }

    Ok(())
}

/// Lowercase direction label for table output.
pub fn direction_label(direction: FlowDirection) -> &'static str {
    match direction {
        FlowDirection::Export => "export",
        FlowDirection::Import => "import",
    }
}
