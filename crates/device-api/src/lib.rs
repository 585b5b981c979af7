//! Paydesk Device API - HTTP client for the remote device API.
//!
//! This crate provides the reqwest-backed implementation of
//! [`paydesk_core::DeviceApiClient`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use paydesk_device_api::DeviceApiHttpClient;
//!
//! let client = DeviceApiHttpClient::new("https://dev-space.su/api/v1/a")?;
//! let devices = client.fetch_devices().await?;
//! client.update_place(7, 3, dec!(50)).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::{DeviceApiHttpClient, DEFAULT_TIMEOUT_SECS};
pub use error::{DeviceApiError, Result};
pub use types::*;
