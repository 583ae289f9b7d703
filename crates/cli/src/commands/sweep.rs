//! Sweep the tariff rate across a range and tabulate the headline impact
//! at each step.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use trade_sim_core::{SimulationConfig, SimulationParams};
use trade_sim_engine::{ImpactCalculator, TariffSimulator};

use super::pipeline::{self, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Path to the bilateral flow CSV feed
    #[arg(short, long, default_value = "flows.csv")]
    pub flows: String,

    /// Path to a country centroid JSON file (defaults to the built-in table)
    #[arg(long)]
    pub centroids: Option<String>,

    /// Path to the simulation constants file
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Number of evenly spaced tariff rates to evaluate
    #[arg(short, long, default_value = "7")]
    pub steps: usize,

    /// Highest tariff rate in the sweep, as a fraction
    #[arg(short, long, default_value = "1.5")]
    pub max_rate: f64,

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

/// Headline numbers for one tariff rate in the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub tariff_rate: f64,
    pub sim_total: f64,
    pub standard_sim_total: f64,
    pub trade_pct_change: f64,
    pub gdp_pct_impact: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    pub retaliation: bool,
    pub config: SimulationConfig,
    pub points: Vec<SweepPoint>,
}

pub fn run_sweep(args: SweepArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    if args.steps < 2 {
        bail!("Sweep needs at least 2 steps, got {}", args.steps);
    }
    // Validates the endpoint before any data is loaded.
    SimulationParams::new(args.max_rate, args.retaliation)?;
    let config = SimulationConfig::load_from(&args.config)?;

    tracing::info!(
        flows = %args.flows,
        steps = args.steps,
        max_rate = args.max_rate,
        retaliation = args.retaliation,
        "running tariff sweep"
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

    let simulator = TariffSimulator::new(config);
    let calculator = ImpactCalculator::new(config);

    let mut points = Vec::with_capacity(args.steps);
    for rate in sweep_rates(args.steps, args.max_rate) {
        let params = SimulationParams::new(rate, args.retaliation)?;
        let run = simulator.simulate(&baseline, &profiles, params);
        let impact = calculator.calculate(&run.stats, params.retaliation);
        points.push(SweepPoint {
            tariff_rate: rate,
            sim_total: run.stats.sim_total,
            standard_sim_total: run.stats.standard_sim_total,
            trade_pct_change: impact.trade_pct_change,
            gdp_pct_impact: impact.gdp_pct_impact,
        });
    }

    let report = SweepReport {
        generated_at: Utc::now(),
        retaliation: args.retaliation,
        config,
        points,
    };
    let text = format_text_report(&report);

    pipeline::emit(&report, &text, format, args.output.as_deref())
}

/// Evenly spaced rates from zero to `max_rate` inclusive.
fn sweep_rates(steps: usize, max_rate: f64) -> Vec<f64> {
    (0..steps)
        .map(|i| max_rate * i as f64 / (steps - 1) as f64)
        .collect()
}

fn format_text_report(report: &SweepReport) -> String {
    let mut output = String::new();

    output.push_str("\n=====================================\n");
    output.push_str("  TARIFF RATE SWEEP\n");
    output.push_str("=====================================\n\n");

    output.push_str(&format!(
        "Retaliation: {}\n",
        if report.retaliation {
            "enabled"
        } else {
            "disabled"
        }
    ));
    output.push_str(&format!("Steps: {}\n\n", report.points.len()));

    output.push_str(&format!(
        "{:>7} {:>16} {:>16} {:>10} {:>10}\n",
        "RATE", "SIM TOTAL", "USA EXPORT SIM", "TRADE CHG", "GDP IMPACT"
    ));
    for point in &report.points {
        output.push_str(&format!(
            "{:>6.1}% {:>16.2} {:>16.2} {:>9.2}% {:>9.2}%\n",
            point.tariff_rate * 100.0,
            point.sim_total,
            point.standard_sim_total,
            point.trade_pct_change,
            point.gdp_pct_impact
        ));
    }

    output
}
