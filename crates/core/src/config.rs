//! Tunable simulation constants.
//!
//! Every numeric constant of the response model lives here rather than in
//! the formulas, because the published sources disagree on the exact figures
//! (retaliation multiplier 1.65 vs 1.8, GDP scaling 0.27×0.75 vs 0.112×0.90).
//! The defaults below are the canonical set; deployments can override any
//! field through `config/Config.toml` or `TRADE_SIM_`-prefixed environment
//! variables.

use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Constants governing the tariff response and impact formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Elasticity magnitude applied when neither a country profile nor a
    /// flow-level coefficient is available.
    pub default_elasticity: f64,
    /// Slope of the export damping factor per unit of tariff rate.
    pub damping_rate: f64,
    /// Ceiling on the share of export volume the damping factor may remove.
    pub damping_cap: f64,
    /// Linear amplification applied to the headline impact under retaliation.
    pub retaliation_multiplier: f64,
    /// Asymptote magnitude of the saturating retaliation curve; the headline
    /// trade change never falls below `-retaliation_floor`.
    pub retaliation_floor: f64,
    /// Exponential rate inside the saturating retaliation curve.
    pub retaliation_curve_rate: f64,
    /// Scaling from trade change to GDP change.
    pub trade_to_gdp_ratio: f64,
    /// Secondary attenuation applied on top of the trade-to-GDP ratio.
    pub gdp_impact_factor: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_elasticity: 1.5,
            damping_rate: 0.15,
            damping_cap: 0.30,
            retaliation_multiplier: 1.65,
            retaliation_floor: 0.80,
            retaliation_curve_rate: 1.80,
            trade_to_gdp_ratio: 0.27,
            gdp_impact_factor: 0.75,
        }
    }
}

impl SimulationConfig {
    /// Loads the configuration from `config/Config.toml` merged with
    /// `TRADE_SIM_`-prefixed environment variables. Missing files and fields
    /// fall back to the defaults.
    ///
    /// # Errors
    /// Returns an error if a present file or variable cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from("config/Config.toml")
    }

    /// Loads the configuration from a specific TOML file merged with
    /// `TRADE_SIM_`-prefixed environment variables.
    ///
    /// # Errors
    /// Returns an error if a present file or variable cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TRADE_SIM_"))
            .extract()?;

        Ok(config)
    }
}
