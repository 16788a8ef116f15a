//! Entity definitions for the game world.

mod actor;
mod stats;

pub use actor::*;
pub use stats::*;
