//! Churn dashboard core.
//!
//! Rules and view-models over a precomputed table of customer churn scores
//! produced upstream by Isolation Forest and Autoencoder detectors.
//!
//! RULES:
//!   - The table is read once and never mutated.
//!   - Every rule is a pure function of one record or one table snapshot.
//!   - Normalisation divisors and band thresholds come from `DashConfig`.

pub mod action;
pub mod classifier;
pub mod config;
pub mod detail;
pub mod error;
pub mod lookup;
pub mod overview;
pub mod record;
pub mod risk;
pub mod stats;
pub mod table;
pub mod types;
