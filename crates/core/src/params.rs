//! Simulation parameters supplied by the caller on every run.
//!
//! The engine holds no ambient parameter state: the tariff rate and the
//! retaliation flag travel together in a [`SimulationParams`] value, and a
//! fresh arc set is derived from the baseline whenever either changes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Conventional upper bound for interactive tariff controls (150%).
///
/// The engine itself computes with any finite non-negative rate; clamping to
/// this range is a presentation-layer concern.
pub const TARIFF_RATE_MAX: f64 = 1.5;

/// Tariff rate and retaliation flag for one simulation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Ad valorem tariff rate as a fraction (0.25 means 25%).
    pub tariff_rate: f64,
    /// Whether partner countries answer with their own tariff on US exports.
    pub retaliation: bool,
}

impl SimulationParams {
    /// Creates parameters with validation.
    ///
    /// # Errors
    /// Returns an error if the tariff rate is negative or not finite.
    pub fn new(tariff_rate: f64, retaliation: bool) -> Result<Self> {
        if !tariff_rate.is_finite() {
            anyhow::bail!("tariff rate must be finite, got {tariff_rate}");
        }
        if tariff_rate < 0.0 {
            anyhow::bail!("tariff rate must be non-negative, got {tariff_rate}");
        }
        Ok(Self {
            tariff_rate,
            retaliation,
        })
    }

    /// Parameters that reproduce the baseline: zero tariff, no retaliation.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            tariff_rate: 0.0,
            retaliation: false,
        }
    }

    /// Sets the retaliation flag.
    #[must_use]
    pub fn with_retaliation(mut self, enabled: bool) -> Self {
        self.retaliation = enabled;
        self
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::baseline()
    }
}
