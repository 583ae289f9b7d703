use clap::{Parser, Subcommand};

mod commands;

use commands::{CountryArgs, PartnersArgs, SimulateArgs, SweepArgs};

#[derive(Parser)]
#[command(name = "trade-sim")]
#[command(about = "Tariff simulation over bilateral trade flows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation pass and report arcs, totals, and impact
    Simulate(SimulateArgs),
    /// Simulate a range of tariff rates and tabulate the headline metrics
    Sweep(SweepArgs),
    /// Show the simulated arcs and elasticity profile of one country
    Country(CountryArgs),
    /// Rank USA trading partners by flow volume
    Partners(PartnersArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Simulate(args) => commands::run_simulate(args)?,
        Commands::Sweep(args) => commands::run_sweep(args)?,
        Commands::Country(args) => commands::run_country(args)?,
        Commands::Partners(args) => commands::run_partners(args)?,
    }

    Ok(())
}
