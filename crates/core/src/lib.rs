pub mod arc;
pub mod config;
pub mod flow;
pub mod geo;
pub mod normalize;
pub mod params;

pub use arc::{ArcKey, TradeArc};
pub use config::SimulationConfig;
pub use flow::{EnrichedFlow, FlowDirection, FlowRecord, USA_ISO3};
pub use geo::{angular_distance, arc_altitude, distance_effect, GeoPoint};
pub use normalize::normalize;
pub use params::{SimulationParams, TARIFF_RATE_MAX};
