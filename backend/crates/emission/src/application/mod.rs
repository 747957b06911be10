//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Each calculation validates its request, computes or fetches the result,
//! and persists one record.

pub mod coal_burn;
pub mod config;
pub mod delete_record;
pub mod electricity;
pub mod explosion;
pub mod fetch_records;
pub mod fuel_combustion;
pub mod methane;
pub mod shipping;
