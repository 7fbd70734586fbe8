//! artifact-demo core - pure UI-state logic with no terminal dependencies
//!
//! This crate contains the tab state, the simulated command dispatcher, the
//! output transcript and the sample tag data behind the artifact demo. It has
//! no dependencies on terminal libraries, clipboards or wall clocks - those
//! are reached through ports and provided by adapters.

pub mod domain;
pub mod ports;
pub mod app;
pub mod error;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
