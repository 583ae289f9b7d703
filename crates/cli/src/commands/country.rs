//! Per-country breakdown of a simulated scenario.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use trade_sim_core::{SimulationConfig, SimulationParams};
use trade_sim_engine::{country_detail, CountryDetail, TariffSimulator};

use super::pipeline::{self, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct CountryArgs {
    /// Country to break down (ISO3, e.g. CHN)
    pub iso3: String,

    /// Path to the bilateral flow CSV feed
    #[arg(short, long, default_value = "flows.csv")]
    pub flows: String,

    /// Path to a country centroid JSON file (defaults to the built-in table)
    #[arg(long)]
    pub centroids: Option<String>,

    /// Path to the simulation constants file
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Ad valorem tariff rate as a fraction (0.25 means 25%)
    #[arg(short, long, default_value = "0.25")]
    pub tariff_rate: f64,

    /// Apply the tariff to inbound arcs as well
    #[arg(short, long)]
    pub retaliation: bool,

    /// Output file path for JSON results
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryReport {
    pub generated_at: DateTime<Utc>,
    pub params: SimulationParams,
    pub config: SimulationConfig,
    pub detail: CountryDetail,
}

pub fn run_country(args: CountryArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let iso3 = args.iso3.to_uppercase();
    let params = SimulationParams::new(args.tariff_rate, args.retaliation)?;
    let config = SimulationConfig::load_from(&args.config)?;

    tracing::info!(
        country = %iso3,
        tariff_rate = params.tariff_rate,
        retaliation = params.retaliation,
        "building country breakdown"
    );

    let (baseline, profiles) = pipeline::load_simulation_data(&args.flows, args.centroids.as_deref())?;

    let run = TariffSimulator::new(config).simulate(&baseline, &profiles, params);
    let detail = country_detail(&iso3, &run.arcs, &profiles);

    if detail.arcs.is_empty() {
        tracing::warn!(country = %iso3, "no arcs touch this country");
        println!("No trade data available for {iso3}.");
        return Ok(());
    }

    let report = CountryReport {
        generated_at: Utc::now(),
        params,
        config,
        detail,
    };
    let text = format_text_report(&report);

    pipeline::emit(&report, &text, format, args.output.as_deref())
}

fn format_text_report(report: &CountryReport) -> String {
    let detail = &report.detail;
    let mut output = String::new();

    output.push_str("\n=====================================\n");
    output.push_str(&format!("  COUNTRY DETAIL: {}\n", detail.iso3));
    output.push_str("=====================================\n\n");

    output.push_str(&format!(
        "Tariff Rate: {:.1}%\n",
        report.params.tariff_rate * 100.0
    ));
    output.push_str(&format!(
        "Retaliation: {}\n",
        if report.params.retaliation {
            "enabled"
        } else {
            "disabled"
        }
    ));

    output.push_str("\n--- ELASTICITY PROFILE ---\n");
    output.push_str(&format!(
        "Export: {:.2}  Import: {:.2}  Overall: {:.2}\n",
        detail.elasticity.export, detail.elasticity.import, detail.elasticity.total
    ));

    output.push_str("\n--- EXPORT ARCS ---\n");
    output.push_str(&format!("Baseline:  {:>16.2}\n", detail.export_base_total));
    output.push_str(&format!("Simulated: {:>16.2}\n", detail.export_sim_total));
    output.push_str(&format!("Change:    {:>+15.2}%\n", detail.export_change_pct));

    output.push_str("\n--- IMPORT ARCS ---\n");
    output.push_str(&format!("Baseline:  {:>16.2}\n", detail.import_base_total));
    output.push_str(&format!("Simulated: {:>16.2}\n", detail.import_sim_total));
    output.push_str(&format!("Change:    {:>+15.2}%\n", detail.import_change_pct));

    output.push_str(&format!("\n--- ARCS ({}) ---\n", detail.arcs.len()));
    output.push_str(&format!(
        "{:<9} {:<9} {:<8} {:>14} {:>14}\n",
        "REPORTER", "PARTNER", "DIR", "BASELINE", "SIMULATED"
    ));
    for arc in &detail.arcs {
        output.push_str(&format!(
            "{:<9} {:<9} {:<8} {:>14.2} {:>14.2}\n",
            arc.reporter,
            arc.partner,
            pipeline::direction_label(arc.direction),
            arc.base_total,
            arc.value
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_sim_core::{FlowDirection, GeoPoint, TradeArc};
    use trade_sim_engine::CountryElasticityProfile;

    fn detail_fixture() -> CountryDetail {
        CountryDetail {
            iso3: "CHN".to_string(),
            elasticity: CountryElasticityProfile {
                export: 1.2,
                import: 0.8,
                total: 1.0,
            },
            export_base_total: 1000.0,
            export_sim_total: 700.0,
            export_change_pct: -30.0,
            import_base_total: 500.0,
            import_sim_total: 500.0,
            import_change_pct: 0.0,
            arcs: vec![TradeArc {
                reporter: "USA".to_string(),
                partner: "CHN".to_string(),
                direction: FlowDirection::Export,
                start: GeoPoint::new(39.8, -98.6),
                end: GeoPoint::new(35.9, 104.2),
                elasticity: Some(1.2),
                base_total: 1000.0,
                value: 700.0,
            }],
        }
    }

    // ============================================
    // Report Tests
    // ============================================

    #[test]
    fn text_report_contains_country_sections() {
        let report = CountryReport {
            generated_at: Utc::now(),
            params: SimulationParams::new(0.25, false).unwrap(),
            config: SimulationConfig::default(),
            detail: detail_fixture(),
        };

        let text = format_text_report(&report);

        assert!(text.contains("COUNTRY DETAIL: CHN"));
        assert!(text.contains("ELASTICITY PROFILE"));
        assert!(text.contains("EXPORT ARCS"));
        assert!(text.contains("IMPORT ARCS"));
        assert!(text.contains("-30.00%"));
    }

    #[test]
    fn text_report_lists_each_touching_arc() {
        let report = CountryReport {
            generated_at: Utc::now(),
            params: SimulationParams::baseline(),
            config: SimulationConfig::default(),
            detail: detail_fixture(),
        };

        let text = format_text_report(&report);

        assert!(text.contains("ARCS (1)"));
        assert!(text.contains("USA"));
        assert!(text.contains("export"));
    }
}
