//! Devices module - domain models and the remote API trait.

mod devices_model;
mod devices_traits;

#[cfg(test)]
mod devices_model_tests;

pub use devices_model::{
    format_amount, format_timestamp, BalanceSign, DeltaDirection, Device, DeviceId,
    PendingMutation, Place, PlaceId,
};
pub use devices_traits::DeviceApiClient;
