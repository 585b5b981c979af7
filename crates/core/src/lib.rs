//! Paydesk Core - device/place balance console logic.
//!
//! This crate contains the domain types, amount validation and the
//! view-state synchronization workflow of the console. It performs no I/O
//! of its own: the remote API is reached through the [`DeviceApiClient`]
//! trait, implemented by the `device-api` crate.

pub mod amounts;
pub mod constants;
pub mod devices;
pub mod errors;
pub mod sync;

pub use devices::{DeviceApiClient, DeviceId, PlaceId};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::{ApiError, ValidationError};
