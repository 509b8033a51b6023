//! Adapter implementations for prediction ports.

pub mod memory;
pub mod model;
pub mod sqlite;
