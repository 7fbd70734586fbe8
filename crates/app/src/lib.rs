//! Artifact demo application library
//!
//! This exposes the public API of the artifact demo for testing and external usage.

pub mod cli;
pub mod config;

pub mod adapters;
pub mod tui;
pub mod runtime;
