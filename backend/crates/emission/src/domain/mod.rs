//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (EmissionRecord and its per-category payloads)
//! - Domain value objects (ExplosiveType, CoalType, MiningType)
//! - Domain services (local emission formulas)
//! - Ports (record repository, third-party estimator)

pub mod entities;
pub mod estimator;
pub mod repository;
pub mod services;
pub mod value_objects;
