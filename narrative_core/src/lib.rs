//! # Narrative Core (The Cortex)
//!
//! The text side of the emergent narrative system. This crate takes untrusted
//! text from an external generator and turns it into data `game_rules` can act
//! on. Nothing in here fails hard on bad input: malformed tags are skipped and
//! malformed requests are rejected whole.
//!
//! ## Core Components
//!
//! - **script**: bracket tag scanning, stat adjustment tags, speaker/message splitting
//! - **generation**: the generator port and the retrying script director
//! - **request_dsl**: `[REQUEST: ...]` parsing and formatting
//! - **config**: TOML-backed engine settings

pub mod config;
pub mod generation;
pub mod request_dsl;
pub mod script;

pub use config::*;
pub use generation::*;
pub use request_dsl::*;
pub use script::*;
