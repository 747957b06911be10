//! Domain Layer
//!
//! Carbon sink entity, the land requirement calculator and the ledger port.

pub mod entities;
pub mod land;
pub mod repository;
