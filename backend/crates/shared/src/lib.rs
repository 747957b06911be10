//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every emissions context agrees on:
//! - Common error types and result aliases
//! - Typed record identifiers
//! - Lenient numeric request input
//! - Reporting time windows and calendar-date validation
//!
//! Only things that mean the same in the emission, sink and report
//! contexts belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod lenient;
pub mod time_window;
