//! # Game Rules
//!
//! The "World Bible" crate - actors, stat vocabularies, world state and the
//! rules that decide whether a faction request can be fulfilled.
//! This crate is the single source of truth for game state and does not contain any AI logic.

pub mod entities;
pub mod ids;
pub mod names;
pub mod requests;
pub mod world_state;

pub use entities::*;
pub use ids::*;
pub use names::*;
pub use requests::*;
pub use world_state::*;
