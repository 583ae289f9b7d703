//! Rank USA trading partners by raw flow volume.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use trade_sim_data::load_flows;
use trade_sim_engine::{partner_volumes, PartnerVolume};

use super::pipeline::{self, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct PartnersArgs {
    /// Path to the bilateral flow CSV feed
    #[arg(short, long, default_value = "flows.csv")]
    pub flows: String,

    /// Show only the top N partners
    #[arg(long)]
    pub top: Option<usize>,

    /// Output file path for JSON results
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnersReport {
    pub generated_at: DateTime<Utc>,
    pub total_volume: f64,
    pub partners: Vec<PartnerVolume>,
}

pub fn run_partners(args: PartnersArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;

    tracing::info!(flows = %args.flows, "ranking USA trading partners");

    let records = load_flows(&args.flows)?;
    let mut partners = partner_volumes(&records);

    if partners.is_empty() {
        tracing::warn!(flows = %args.flows, "no USA flows in feed");
        println!("No USA flows found in {}.", args.flows);
        return Ok(());
    }

    // Shares stay relative to the full ranking even when truncated.
    let total_volume: f64 = partners.iter().map(|p| p.volume).sum();
    if let Some(top) = args.top {
        partners.truncate(top);
    }

    let report = PartnersReport {
        generated_at: Utc::now(),
        total_volume,
        partners,
    };
    let text = format_text_report(&report);

    pipeline::emit(&report, &text, format, args.output.as_deref())
}

fn format_text_report(report: &PartnersReport) -> String {
    let mut output = String::new();

    output.push_str("\n=====================================\n");
    output.push_str("  USA TRADING PARTNERS\n");
    output.push_str("=====================================\n\n");

    output.push_str(&format!(
        "{:>5} {:<9} {:>16} {:>8}\n",
        "RANK", "COUNTRY", "VOLUME", "SHARE"
    ));
    for (i, partner) in report.partners.iter().enumerate() {
        output.push_str(&format!(
            "{:>5} {:<9} {:>16.2} {:>7.2}%\n",
            i + 1,
            partner.country,
            partner.volume,
            partner.share_pct
        ));
    }

    output.push_str(&format!(
        "\nTotal volume across all partners: {:.2}\n",
        report.total_volume
    ));

    output
}
