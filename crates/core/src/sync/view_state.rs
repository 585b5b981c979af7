//! Navigation state of the console.
//!
//! A `ViewState` is never mutated in place: every navigation produces a new
//! value. Each navigation also bumps `generation`, which is how responses
//! that arrive after the operator moved on are recognized as stale.

use serde::Serialize;

use crate::devices::{DeviceId, PlaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    DeviceList,
    PlaceList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub mode: ViewMode,
    pub selected_device_id: Option<DeviceId>,
    /// Cached for the header so the place view needs no extra fetch.
    pub selected_device_name: String,
    /// Place targeted by the keypad, if any.
    pub selected_place_id: Option<PlaceId>,
    pub generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Application start: device list, nothing selected.
    pub fn new() -> Self {
        Self {
            mode: ViewMode::DeviceList,
            selected_device_id: None,
            selected_device_name: String::new(),
            selected_place_id: None,
            generation: 0,
        }
    }

    pub fn enter_device(&self, device_id: DeviceId, device_name: impl Into<String>) -> Self {
        Self {
            mode: ViewMode::PlaceList,
            selected_device_id: Some(device_id),
            selected_device_name: device_name.into(),
            selected_place_id: None,
            generation: self.generation + 1,
        }
    }

    pub fn back_to_devices(&self) -> Self {
        Self {
            mode: ViewMode::DeviceList,
            selected_device_id: None,
            selected_device_name: String::new(),
            selected_place_id: None,
            generation: self.generation + 1,
        }
    }

    /// Targeting a place does not change what is on screen, so the
    /// generation stays the same.
    pub fn target_place(&self, place_id: Option<PlaceId>) -> Self {
        Self {
            selected_place_id: place_id,
            ..self.clone()
        }
    }

    /// True while the place view of `device_id` is the current view.
    pub fn is_viewing(&self, device_id: DeviceId) -> bool {
        self.mode == ViewMode::PlaceList && self.selected_device_id == Some(device_id)
    }
}
