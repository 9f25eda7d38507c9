//! MINECALC: Bitcoin mining profitability estimator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod data;
pub mod engine;
pub mod analysis;
pub mod report;
