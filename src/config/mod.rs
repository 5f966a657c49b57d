//! Synthesis Configuration Module
//!
//! Waveform constants, dataset preset and output target, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `PAVEMENT_SYNTH_CONFIG` environment variable (path to TOML file)
//! 2. `synth_config.toml` in the current working directory
//! 3. Built-in defaults (the fixed reference constants)
//!
//! The loaded value is passed explicitly to the generators; there is no
//! process-wide config state.

mod synth_config;
pub mod defaults;
pub mod validation;

pub use synth_config::*;
