//! Crop yield prediction serving.
//!
//! Validates submitted growing conditions, encodes them into the model's
//! fixed feature order, scores them with an injected model, interprets the
//! result as a yield tier and records every prediction in an append-only
//! store. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
