//! Reference cave for the `wumpus-core` agent, plus YAML simulation config.

#![forbid(unsafe_code)]

pub mod config;
pub mod layout;
pub mod world;

pub use config::SimulationConfig;
pub use layout::{LayoutError, WorldLayout, MAX_SIZE};
pub use world::WumpusWorld;
