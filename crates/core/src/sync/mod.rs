//! Sync module - view state, controller, notifier and effect runtime.

mod commands;
mod controller;
mod notifier;
mod render;
mod runtime;
mod view_state;


pub use commands::{Command, Effect, Outcome, RequestId};
pub use controller::{ListStatus, SyncConfig, SyncController, SyncPhase};
pub use notifier::{Banner, BannerKind, Notifier};
pub use render::{
    DeviceCard, DeviceListView, KeypadView, PlaceCard, PlaceListView, Screen, ScreenView,
};
pub use runtime::{execute, SyncRuntime};
pub use view_state::{ViewMode, ViewState};
