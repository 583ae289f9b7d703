//! CLI commands for the tariff simulation engine.

pub mod country;
pub mod partners;
mod pipeline;
pub mod simulate;
pub mod sweep;

pub use country::{run_country, CountryArgs};
pub use partners::{run_partners, PartnersArgs};
pub use simulate::{run_simulate, SimulateArgs};
pub use sweep::{run_sweep, SweepArgs};
