//! Yieldcast: crop yield prediction serving.
//!
//! This crate wraps a pre-trained regression model behind a small web
//! application. Each request is validated, one-hot encoded into the model's
//! fixed feature order, scored, classified into a yield tier and recorded in
//! an append-only `SQLite` store whose history is rendered back to the
//! caller.
//!
//! # Architecture
//!
//! Yieldcast follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and the model
//! - **Adapters**: Concrete implementations of ports (`SQLite`, in-memory,
//!   JSON linear model)
//!
//! # Modules
//!
//! - [`prediction`]: Encoding, interpretation, persistence and orchestration
//! - [`web`]: HTTP routes and page rendering
//! - [`config`]: Command-line and environment configuration

pub mod config;
pub mod prediction;
pub mod web;
