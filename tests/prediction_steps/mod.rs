//! Step definitions for prediction flow scenarios.

mod given;
mod then;
mod when;
pub mod world;
