//! Run a single tariff scenario and report the resulting arc set.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use trade_sim_core::{
    angular_distance, arc_altitude, distance_effect, normalize, FlowDirection, SimulationConfig,
    SimulationParams, TradeArc,
};
use trade_sim_engine::{ImpactCalculator, ImpactMetrics, SimulationStats, TariffSimulator};

use super::pipeline::{self, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
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

    /// Number of arcs to show in the text report
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Output file path for JSON results
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// One simulated arc with its render-ready altitude.
#[derive(Debug, Clone, Serialize)]
pub struct ArcReport {
    pub reporter: String,
    pub partner: String,
    pub direction: FlowDirection,
    pub base_total: f64,
    pub value: f64,
    pub change_pct: f64,
    pub elasticity: Option<f64>,
    pub altitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub params: SimulationParams,
    pub config: SimulationConfig,
    pub stats: SimulationStats,
    pub impact: ImpactMetrics,
    pub arcs: Vec<ArcReport>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let params = SimulationParams::new(args.tariff_rate, args.retaliation)?;
    let config = SimulationConfig::load_from(&args.config)?;

    tracing::info!(
        flows = %args.flows,
        tariff_rate = params.tariff_rate,
        retaliation = params.retaliation,
        "running tariff simulation"
    );

    let (baseline, profiles) = pipeline::load_simulation_data(&args.flows, args.centroids.as_deref())?;

    if baseline.is_empty() {
        tracing::warn!(flows = %args.flows, "no usable flows after enrichment");
        println!(
            "No flow in {} survived enrichment; nothing to simulate.",
            args.flows
        );
        return Ok(());
    }

    let run = TariffSimulator::new(config).simulate(&baseline, &profiles, params);
    let impact = ImpactCalculator::new(config).calculate(&run.stats, params.retaliation);

    tracing::info!(
        arcs = run.arcs.len(),
        sim_total = run.stats.sim_total,
        trade_pct_change = impact.trade_pct_change,
        "simulation complete"
    );

    let report = build_report(&run.arcs, run.stats, params, config, impact);
    let text = format_text_report(&report, args.top);

    pipeline::emit(&report, &text, format, args.output.as_deref())
}

fn build_report(
    arcs: &[TradeArc],
    stats: SimulationStats,
    params: SimulationParams,
    config: SimulationConfig,
    impact: ImpactMetrics,
) -> SimulationReport {
    let mut reports: Vec<ArcReport> = arcs
        .iter()
        .map(|arc| {
            let effect = distance_effect(angular_distance(arc.start, arc.end));
            let altitude = arc_altitude(normalize(arc.value, stats.min, stats.max), effect);
            ArcReport {
                reporter: arc.reporter.clone(),
                partner: arc.partner.clone(),
                direction: arc.direction,
                base_total: arc.base_total,
                value: arc.value,
                change_pct: arc.change_pct(),
                elasticity: arc.elasticity,
                altitude,
            }
        })
        .collect();

    reports.sort_by(|a, b| b.value.total_cmp(&a.value));

    SimulationReport {
        generated_at: Utc::now(),
        params,
        config,
        stats,
        impact,
        arcs: reports,
    }
}

fn format_text_report(report: &SimulationReport, top: usize) -> String {
    let mut output = String::new();

    output.push_str("\n=====================================\n");
    output.push_str("  TARIFF SIMULATION RESULTS\n");
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
    output.push_str(&format!("Arcs: {}\n", report.arcs.len()));

    output.push_str("\n--- TRADE TOTALS ---\n");
    output.push_str(&format!(
        "Baseline Total:    {:>16.2}\n",
        report.stats.base_total
    ));
    output.push_str(&format!(
        "Simulated Total:   {:>16.2}\n",
        report.stats.sim_total
    ));
    output.push_str(&format!(
        "USA Export Base:   {:>16.2}\n",
        report.stats.standard_base_total
    ));
    output.push_str(&format!(
        "USA Export Sim:    {:>16.2}\n",
        report.stats.standard_sim_total
    ));

    output.push_str("\n--- HEADLINE IMPACT ---\n");
    output.push_str(&format!(
        "Trade Change: {:+.2}%\n",
        report.impact.trade_pct_change
    ));
    output.push_str(&format!(
        "GDP Impact:   {:+.2}%\n",
        report.impact.gdp_pct_impact
    ));

    let shown = top.min(report.arcs.len());
    output.push_str(&format!("\n--- TOP {shown} ARCS ---\n"));
    output.push_str(&format!(
        "{:<9} {:<9} {:<8} {:>14} {:>14} {:>9}\n",
        "REPORTER", "PARTNER", "DIR", "BASELINE", "SIMULATED", "CHANGE"
    ));
    for arc in report.arcs.iter().take(shown) {
        output.push_str(&format!(
            "{:<9} {:<9} {:<8} {:>14.2} {:>14.2} {:>8.2}%\n",
            arc.reporter,
            arc.partner,
            pipeline::direction_label(arc.direction),
            arc.base_total,
            arc.value,
            arc.change_pct
        ));
    }

    output
}
