//! Sync controller.
//!
//! Orchestrates the console: device list → place list → balance mutation →
//! refresh. The controller never performs I/O. Commands and outcomes go in,
//! effects come out, and [`SyncController::screen`] renders the current state.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use log::{debug, info, warn};

use super::commands::{Command, Effect, Outcome, RequestId};
use super::notifier::Notifier;
use super::render::{render, Screen};
use super::view_state::{ViewMode, ViewState};
use crate::amounts::{validate_amount, Keypad};
use crate::constants::{DEFAULT_BANNER_MILLIS, DEVICE_LIST_LOAD_FAILED, DEVICE_LOAD_FAILED};
use crate::devices::{
    format_amount, DeltaDirection, Device, DeviceId, PendingMutation, PlaceId,
};
use crate::errors::{self, ApiError, Error};

/// Controller settings.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub banner_ttl: Duration,
}

impl SyncConfig {
    /// A zero banner duration would hide every banner as soon as it appears.
    pub fn new(banner_ttl: Duration) -> errors::Result<Self> {
        if banner_ttl.is_zero() {
            return Err(Error::InvalidConfigValue(
                "banner duration must be greater than zero".to_string(),
            ));
        }
        Ok(Self { banner_ttl })
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            banner_ttl: Duration::from_millis(DEFAULT_BANNER_MILLIS),
        }
    }
}

/// Coarse state of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    LoadingDevices,
    DeviceListIdle,
    LoadingPlaces {
        device_id: DeviceId,
    },
    PlaceListIdle {
        device_id: DeviceId,
    },
    Submitting {
        device_id: DeviceId,
        place_id: PlaceId,
    },
}

/// What the device list currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Initial fetch not answered yet.
    Loading,
    Ready,
    /// The server returned an empty list.
    NoDevices,
    /// The initial fetch failed; the list is cleared.
    LoadFailed,
}

#[derive(Debug, Clone)]
pub(crate) struct DeviceListModel {
    pub(crate) devices: Vec<Device>,
    pub(crate) status: ListStatus,
}

#[derive(Debug, Clone)]
pub(crate) struct PlaceListModel {
    pub(crate) device: Device,
    pub(crate) inputs: HashMap<PlaceId, String>,
    pub(crate) errors: HashMap<PlaceId, String>,
}

impl PlaceListModel {
    fn new(device: Device) -> Self {
        Self {
            device,
            inputs: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    fn has_place(&self, place_id: PlaceId) -> bool {
        self.device.find_place(place_id).is_some()
    }

    /// Swaps in a freshly fetched device. Balances are replaced wholesale.
    fn replace_device(&mut self, device: Device) {
        self.inputs.retain(|id, _| device.find_place(*id).is_some());
        self.errors.retain(|id, _| device.find_place(*id).is_some());
        self.device = device;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailPurpose {
    Open,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingDetail {
    request: RequestId,
    device_id: DeviceId,
    purpose: DetailPurpose,
    generation: u64,
}

/// Owns the view state and every piece of fetched data.
#[derive(Debug)]
pub struct SyncController {
    view: ViewState,
    pub(crate) devices: DeviceListModel,
    pub(crate) places: Option<PlaceListModel>,
    /// At most one mutation per place, keyed to the request that owns it.
    pub(crate) in_flight: BTreeMap<(DeviceId, PlaceId), RequestId>,
    pub(crate) keypad: Option<Keypad>,
    pub(crate) notifier: Notifier,
    next_request: RequestId,
    list_request: Option<RequestId>,
    detail_request: Option<PendingDetail>,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl SyncController {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            view: ViewState::new(),
            devices: DeviceListModel {
                devices: Vec::new(),
                status: ListStatus::Loading,
            },
            places: None,
            in_flight: BTreeMap::new(),
            keypad: None,
            notifier: Notifier::new(config.banner_ttl),
            next_request: 0,
            list_request: None,
            detail_request: None,
        }
    }

    /// Application start: fetch the device list.
    pub fn start(&mut self) -> Vec<Effect> {
        info!("Loading device list");
        self.devices.status = ListStatus::Loading;
        vec![self.request_device_list()]
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn list_status(&self) -> ListStatus {
        self.devices.status
    }

    pub fn phase(&self) -> SyncPhase {
        match self.view.mode {
            ViewMode::DeviceList => {
                if let Some(pending) = self.detail_request {
                    SyncPhase::LoadingPlaces {
                        device_id: pending.device_id,
                    }
                } else if self.list_request.is_some() {
                    SyncPhase::LoadingDevices
                } else {
                    SyncPhase::DeviceListIdle
                }
            }
            ViewMode::PlaceList => {
                let device_id = self.view.selected_device_id.unwrap_or_default();
                if let Some(((_, place_id), _)) = self
                    .in_flight
                    .iter()
                    .find(|((device, _), _)| *device == device_id)
                {
                    SyncPhase::Submitting {
                        device_id,
                        place_id: *place_id,
                    }
                } else if self.detail_request.is_some() {
                    SyncPhase::LoadingPlaces { device_id }
                } else {
                    SyncPhase::PlaceListIdle { device_id }
                }
            }
        }
    }

    pub fn is_submitting(&self, device_id: DeviceId, place_id: PlaceId) -> bool {
        self.in_flight.contains_key(&(device_id, place_id))
    }

    pub(crate) fn is_fetching_device(&self) -> bool {
        self.detail_request.is_some()
    }

    /// Renders the current state.
    pub fn screen(&self) -> Screen {
        render(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        debug!("Command: {:?}", command);
        match command {
            Command::RefreshDevices => self.refresh_devices(),
            Command::SelectDevice(device_id) => self.select_device(device_id),
            Command::Back => {
                self.back();
                Vec::new()
            }
            Command::SetAmount { place_id, raw } => {
                self.set_amount(place_id, raw);
                Vec::new()
            }
            Command::Submit {
                place_id,
                direction,
            } => self.submit(place_id, direction),
            Command::OpenKeypad { place_id } => {
                self.open_keypad(place_id);
                Vec::new()
            }
            Command::KeypadKey(key) => {
                if let (Some(keypad), Some(place_id)) =
                    (self.keypad.as_mut(), self.view.selected_place_id)
                {
                    let value = keypad.press(key).to_string();
                    if let Some(places) = self.places.as_mut() {
                        places.inputs.insert(place_id, value);
                    }
                }
                Vec::new()
            }
            Command::KeypadSubmit(direction) => self.keypad_submit(direction),
            Command::CloseKeypad => {
                self.close_keypad();
                Vec::new()
            }
            Command::DismissBanner => {
                self.notifier.dismiss();
                Vec::new()
            }
        }
    }

    fn refresh_devices(&mut self) -> Vec<Effect> {
        if self.phase() != SyncPhase::DeviceListIdle {
            debug!("Ignoring device list refresh outside idle device list");
            return Vec::new();
        }
        info!("Refreshing device list");
        vec![self.request_device_list()]
    }

    fn select_device(&mut self, device_id: DeviceId) -> Vec<Effect> {
        if self.phase() != SyncPhase::DeviceListIdle {
            debug!("Ignoring selection of device {} while busy", device_id);
            return Vec::new();
        }
        if !self.devices.devices.iter().any(|d| d.id == device_id) {
            warn!("Device {} is not in the device list", device_id);
            return Vec::new();
        }
        info!("Opening device {}", device_id);
        vec![self.request_device(device_id, DetailPurpose::Open)]
    }

    fn back(&mut self) {
        if self.view.mode != ViewMode::PlaceList {
            return;
        }
        info!("Back to device list");
        // no refetch on back
        self.view = self.view.back_to_devices();
        self.places = None;
        self.keypad = None;
        self.detail_request = None;
    }

    fn set_amount(&mut self, place_id: PlaceId, raw: String) {
        let Some(places) = self.places.as_mut() else {
            return;
        };
        if !places.has_place(place_id) {
            return;
        }
        if self.view.selected_place_id == Some(place_id) {
            self.keypad = Some(Keypad::with_input(&raw));
        }
        places.inputs.insert(place_id, raw);
    }

    fn submit(&mut self, place_id: PlaceId, direction: DeltaDirection) -> Vec<Effect> {
        let Some(device_id) = self.view.selected_device_id else {
            return Vec::new();
        };
        let Some(places) = self.places.as_mut() else {
            return Vec::new();
        };
        if !places.has_place(place_id) {
            warn!("Place {} does not exist on device {}", place_id, device_id);
            return Vec::new();
        }
        if self.in_flight.contains_key(&(device_id, place_id)) {
            debug!(
                "Place {} of device {} already has a mutation in flight",
                place_id, device_id
            );
            return Vec::new();
        }

        let raw = places.inputs.get(&place_id).map(String::as_str).unwrap_or("");
        let amount = match validate_amount(raw) {
            Ok(amount) => amount,
            Err(e) => {
                places.errors.insert(place_id, e.to_string());
                return Vec::new();
            }
        };
        places.errors.remove(&place_id);

        let mutation = PendingMutation::new(device_id, place_id, direction, amount);
        let request = self.next_request_id();
        info!(
            "Submitting delta {} to place {} of device {}",
            mutation.delta, place_id, device_id
        );
        self.in_flight.insert((device_id, place_id), request);
        vec![Effect::ApplyDelta { request, mutation }]
    }

    fn open_keypad(&mut self, place_id: PlaceId) {
        let Some(places) = self.places.as_ref() else {
            return;
        };
        if !places.has_place(place_id) {
            return;
        }
        let input = places.inputs.get(&place_id).map(String::as_str).unwrap_or("");
        self.keypad = Some(Keypad::with_input(input));
        self.view = self.view.target_place(Some(place_id));
    }

    fn keypad_submit(&mut self, direction: DeltaDirection) -> Vec<Effect> {
        let Some(place_id) = self.view.selected_place_id else {
            return Vec::new();
        };
        if self.keypad.is_none() {
            return Vec::new();
        }
        let effects = self.submit(place_id, direction);
        if !effects.is_empty() {
            self.close_keypad();
        }
        effects
    }

    fn close_keypad(&mut self) {
        self.keypad = None;
        self.view = self.view.target_place(None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::DevicesLoaded { request, result } => self.devices_loaded(request, result),
            Outcome::DeviceLoaded {
                request,
                device_id,
                result,
            } => self.device_loaded(request, device_id, result),
            Outcome::DeltaApplied {
                request,
                mutation,
                result,
            } => self.delta_applied(request, mutation, result),
            Outcome::BannerElapsed { generation } => {
                self.notifier.expire(generation);
                Vec::new()
            }
        }
    }

    fn devices_loaded(
        &mut self,
        request: RequestId,
        result: Result<Vec<Device>, ApiError>,
    ) -> Vec<Effect> {
        if self.list_request != Some(request) {
            warn!("Discarding stale device list response #{}", request);
            return Vec::new();
        }
        self.list_request = None;

        match result {
            Ok(devices) => {
                info!("Loaded {} devices", devices.len());
                self.devices.status = if devices.is_empty() {
                    ListStatus::NoDevices
                } else {
                    ListStatus::Ready
                };
                self.devices.devices = devices;
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to load device list: {}", e);
                if self.devices.status == ListStatus::Loading {
                    self.devices.devices.clear();
                    self.devices.status = ListStatus::LoadFailed;
                }
                vec![self.notifier.show_error(DEVICE_LIST_LOAD_FAILED)]
            }
        }
    }

    fn device_loaded(
        &mut self,
        request: RequestId,
        device_id: DeviceId,
        result: Result<Device, ApiError>,
    ) -> Vec<Effect> {
        let pending = match self.detail_request {
            Some(pending)
                if pending.request == request
                    && pending.device_id == device_id
                    && pending.generation == self.view.generation =>
            {
                pending
            }
            _ => {
                warn!(
                    "Discarding stale response #{} for device {}",
                    request, device_id
                );
                return Vec::new();
            }
        };
        self.detail_request = None;

        match (pending.purpose, result) {
            (DetailPurpose::Open, Ok(device)) => {
                let name = self
                    .devices
                    .devices
                    .iter()
                    .find(|d| d.id == device_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| device.name.clone());
                info!("Showing {} places of device {}", device.places.len(), device_id);
                self.view = self.view.enter_device(device_id, name);
                self.places = Some(PlaceListModel::new(device));
                self.keypad = None;
                Vec::new()
            }
            (DetailPurpose::Refresh, Ok(device)) => {
                if let Some(places) = self.places.as_mut() {
                    places.replace_device(device);
                }
                Vec::new()
            }
            (_, Err(e)) => {
                warn!("Failed to load device {}: {}", device_id, e);
                vec![self.notifier.show_error(DEVICE_LOAD_FAILED)]
            }
        }
    }

    fn delta_applied(
        &mut self,
        request: RequestId,
        mutation: PendingMutation,
        result: Result<(), ApiError>,
    ) -> Vec<Effect> {
        let key = (mutation.device_id, mutation.place_id);
        if self.in_flight.get(&key) != Some(&request) {
            warn!("Discarding unknown mutation response #{}", request);
            return Vec::new();
        }
        self.in_flight.remove(&key);

        let on_screen = self.view.is_viewing(mutation.device_id) && self.places.is_some();
        match result {
            Ok(()) => {
                info!(
                    "Applied delta {} to place {} of device {}",
                    mutation.delta, mutation.place_id, mutation.device_id
                );
                let mut effects = vec![self.notifier.show_success(success_message(&mutation))];
                if on_screen {
                    if let Some(places) = self.places.as_mut() {
                        places.inputs.remove(&mutation.place_id);
                        places.errors.remove(&mutation.place_id);
                    }
                    effects.push(self.request_device(mutation.device_id, DetailPurpose::Refresh));
                }
                effects
            }
            Err(e) => {
                warn!(
                    "Delta {} to place {} of device {} failed: {}",
                    mutation.delta, mutation.place_id, mutation.device_id, e
                );
                let message = mutation_error_message(&e);
                match self.places.as_mut() {
                    Some(places) if on_screen => {
                        places.errors.insert(mutation.place_id, message);
                        Vec::new()
                    }
                    _ => vec![self
                        .notifier
                        .show_error(format!("Place {}: {}", mutation.place_id, message))],
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    fn request_device_list(&mut self) -> Effect {
        let request = self.next_request_id();
        self.list_request = Some(request);
        Effect::ListDevices { request }
    }

    fn request_device(&mut self, device_id: DeviceId, purpose: DetailPurpose) -> Effect {
        let request = self.next_request_id();
        self.detail_request = Some(PendingDetail {
            request,
            device_id,
            purpose,
            generation: self.view.generation,
        });
        Effect::FetchDevice { request, device_id }
    }
}

fn success_message(mutation: &PendingMutation) -> String {
    format!(
        "{} of {} completed for place {}",
        mutation.direction().label(),
        format_amount(mutation.delta.abs()),
        mutation.place_id
    )
}

/// Text shown next to the place card when a mutation fails.
fn mutation_error_message(error: &ApiError) -> String {
    match error {
        ApiError::HttpStatus { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
