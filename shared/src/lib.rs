//! Shared types and calculators for the Farm Operations Platform
//!
//! This crate contains the harvest timing and time-clock engines shared
//! between the backend, the frontend (via WASM), and other components.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
