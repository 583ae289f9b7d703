pub mod baseline;
pub mod elasticity;
pub mod impact;
pub mod simulator;
pub mod stats;
pub mod summary;

pub use baseline::Baseline;
pub use elasticity::{CountryElasticityProfile, ElasticityProfiles};
pub use impact::{ImpactCalculator, ImpactMetrics};
pub use simulator::{SimulationRun, TariffSimulator};
pub use stats::SimulationStats;
pub use summary::{country_detail, partner_volumes, CountryDetail, PartnerVolume};
