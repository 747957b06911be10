//! Infrastructure Layer
//!
//! PostgreSQL record store and the third-party calculation providers.

pub mod carbon_interface;
pub mod carbonkit;
pub mod http_estimator;
pub mod postgres;
