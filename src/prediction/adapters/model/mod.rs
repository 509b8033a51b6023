//! Model adapters implementing the [`YieldModel`](crate::prediction::ports::YieldModel) port.

mod linear;

pub use linear::{LinearYieldModel, ModelLoadError};
