//! clientePredict
//!
//! Football match-outcome probabilities from historical scoring averages,
//! served over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API → Aggregator (team goal means) → Poisson model → Predictor → response
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod predict;
pub mod types;
