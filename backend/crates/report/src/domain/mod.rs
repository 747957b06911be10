//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Unit normalizer and category aggregator
//! - Summary builder (totals, net emissions, impact level)
//! - Prompt assembly and narrative formatting
//! - Ports (report sources, narrative provider)

pub mod aggregator;
pub mod narrative;
pub mod normalizer;
pub mod prompt;
pub mod provider;
pub mod source;
pub mod summary;
