//! Infrastructure Layer
//!
//! Store-backed report source and the narrative provider clients.

pub mod cohere;
pub mod gemini;
pub mod narrative;
pub mod repository_source;
