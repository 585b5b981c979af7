//! Device API trait.
//!
//! This trait defines the contract for the remote device API without any
//! transport-specific types, so the sync layer can be driven by the HTTP
//! client in production and by in-memory fakes in tests.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::devices_model::{Device, DeviceId, PlaceId};
use crate::errors::ApiError;

/// Trait for the three remote device operations.
#[async_trait]
pub trait DeviceApiClient: Send + Sync {
    /// Lists all devices. An empty list is a valid result.
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError>;

    /// Fetches one device with its places.
    async fn get_device(&self, device_id: DeviceId) -> Result<Device, ApiError>;

    /// Applies a signed delta to a place balance.
    ///
    /// Not idempotent: callers must never retry this automatically.
    async fn apply_delta(
        &self,
        device_id: DeviceId,
        place_id: PlaceId,
        delta: Decimal,
    ) -> Result<(), ApiError>;
}
