pub mod config;
pub mod error;
pub mod types;

pub use config::LaneConfig;
pub use error::{LaneError, Result};
pub use types::{EntityId, Side, Tick, WaypointId};
