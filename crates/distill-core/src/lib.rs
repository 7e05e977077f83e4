//! Core types for Distill design exports.
//!
//! This crate provides the foundational types used across the Distill crates:
//! - Raw node records as handed over by the host extraction step
//! - The minimized output tree and export envelope
//! - The per-export token registry
//! - Export options and error types

pub mod errors;
pub mod options;
pub mod output;
pub mod raw;
pub mod tokens;
pub mod types;

pub use errors::*;
pub use options::*;
pub use output::*;
pub use raw::*;
pub use tokens::*;
pub use types::*;
