//! Messages flowing into and out of the sync controller.
//!
//! UI events are translated into [`Command`]s by a thin adapter. The
//! controller answers with [`Effect`]s for the runtime to execute, and the
//! runtime reports back with [`Outcome`]s.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::amounts::KeypadKey;
use crate::devices::{DeltaDirection, Device, DeviceId, PendingMutation, PlaceId};
use crate::errors::ApiError;

/// Identifies one issued request so its response can be matched to it.
pub type RequestId = u64;

/// Operator intent, decoupled from how it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-fetch the device list.
    RefreshDevices,
    /// Open the place view of a device.
    SelectDevice(DeviceId),
    /// Return to the device list without re-fetching it.
    Back,
    /// Replace the amount input of a place.
    SetAmount { place_id: PlaceId, raw: String },
    /// Validate the place's amount input and submit it.
    Submit {
        place_id: PlaceId,
        direction: DeltaDirection,
    },
    OpenKeypad { place_id: PlaceId },
    KeypadKey(KeypadKey),
    /// Submit the keypad's target place.
    KeypadSubmit(DeltaDirection),
    CloseKeypad,
    DismissBanner,
}

/// Work the controller asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListDevices {
        request: RequestId,
    },
    FetchDevice {
        request: RequestId,
        device_id: DeviceId,
    },
    ApplyDelta {
        request: RequestId,
        mutation: PendingMutation,
    },
    /// Hide the banner of `generation` once `after` has elapsed.
    HideBanner { generation: u64, after: Duration },
}

impl Effect {
    pub fn apply_delta(
        request: RequestId,
        device_id: DeviceId,
        place_id: PlaceId,
        delta: Decimal,
    ) -> Self {
        Self::ApplyDelta {
            request,
            mutation: PendingMutation {
                device_id,
                place_id,
                delta,
            },
        }
    }
}

/// Result of an executed effect, fed back into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    DevicesLoaded {
        request: RequestId,
        result: Result<Vec<Device>, ApiError>,
    },
    DeviceLoaded {
        request: RequestId,
        device_id: DeviceId,
        result: Result<Device, ApiError>,
    },
    DeltaApplied {
        request: RequestId,
        mutation: PendingMutation,
        result: Result<(), ApiError>,
    },
    BannerElapsed {
        generation: u64,
    },
}
