//! Wire types for device API requests and responses.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DeviceApiError, Result};

/// Body of `POST /devices/{deviceId}/place/{placeId}/update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaRequest {
    /// Positive for deposit, negative for withdraw.
    pub delta: serde_json::Number,
}

impl DeltaRequest {
    /// Integral deltas go out as JSON integers, the rest as floats.
    pub fn new(delta: Decimal) -> Result<Self> {
        let integral = if delta.fract().is_zero() {
            delta.to_i64().map(serde_json::Number::from)
        } else {
            None
        };
        let number = integral
            .or_else(|| delta.to_f64().and_then(serde_json::Number::from_f64))
            .ok_or_else(|| {
                DeviceApiError::invalid_request(format!("Unsupported delta: {}", delta))
            })?;

        Ok(Self { delta: number })
    }
}

/// Error body the API may attach to a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
