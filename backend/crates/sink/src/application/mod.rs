//! Application Layer - Use Cases

pub mod delete;
pub mod fetch;
pub mod register;
pub mod required_land;
