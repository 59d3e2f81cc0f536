//! Olympics Dashboard - medal and participation analysis over historical
//! Games results.
//!
//! The library holds the data layer and every aggregation; the binary wraps
//! it in an egui window.

pub mod analysis;
pub mod config;
pub mod data;
pub mod stats;
