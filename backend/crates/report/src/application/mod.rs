//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod analysis;
pub mod collect_window;
pub mod config;
pub mod periodic_report;
