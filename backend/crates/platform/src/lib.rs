//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the bounded contexts:
//! - In-process expiring cache with a periodic sweeper
//! - Outbound HTTP client construction and upstream error classification

pub mod cache;
pub mod http;
