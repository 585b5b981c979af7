//! Effect executor.
//!
//! Runs the controller's effects as tokio tasks against a [`DeviceApiClient`]
//! and sends every result back through a channel. Nothing here is retried:
//! list and detail fetches are re-issued by the operator, and `apply_delta`
//! must never be replayed.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use super::commands::{Effect, Outcome};
use crate::devices::DeviceApiClient;

#[derive(Clone)]
pub struct SyncRuntime {
    api: Arc<dyn DeviceApiClient>,
    outcomes: mpsc::UnboundedSender<Outcome>,
}

impl SyncRuntime {
    /// Creates the runtime and the receiving end of its outcome channel.
    pub fn new(api: Arc<dyn DeviceApiClient>) -> (Self, mpsc::UnboundedReceiver<Outcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, outcomes: tx }, rx)
    }

    /// Spawns every effect. Must be called from within a tokio runtime.
    pub fn dispatch_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    pub fn dispatch(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = execute(api.as_ref(), effect).await;
            if outcomes.send(outcome).is_err() {
                debug!("Outcome receiver dropped; discarding result");
            }
        });
    }
}

/// Performs one effect and reports its outcome.
pub async fn execute(api: &dyn DeviceApiClient, effect: Effect) -> Outcome {
    match effect {
        Effect::ListDevices { request } => Outcome::DevicesLoaded {
            request,
            result: api.list_devices().await,
        },
        Effect::FetchDevice { request, device_id } => Outcome::DeviceLoaded {
            request,
            device_id,
            result: api.get_device(device_id).await,
        },
        Effect::ApplyDelta { request, mutation } => {
            let result = api
                .apply_delta(mutation.device_id, mutation.place_id, mutation.delta)
                .await;
            Outcome::DeltaApplied {
                request,
                mutation,
                result,
            }
        }
        Effect::HideBanner { generation, after } => {
            tokio::time::sleep(after).await;
            Outcome::BannerElapsed { generation }
        }
    }
}
