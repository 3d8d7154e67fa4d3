pub mod config;
pub mod events;
pub mod seed;
pub mod trip_store;

pub use config::{Config, EngineConfig};
pub use events::{event_stream, TripEvent};
pub use trip_store::TripStore;
