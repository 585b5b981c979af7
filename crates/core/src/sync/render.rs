//! Render pass: a pure function of the controller's state.
//!
//! The produced [`Screen`] is a plain view model. Front ends draw it however
//! they like and never look at the controller directly.

use rust_decimal::Decimal;

use super::controller::{ListStatus, SyncController, SyncPhase};
use super::notifier::Banner;
use super::view_state::ViewMode;
use crate::constants::TOTAL_OUT_OF_RANGE;
use crate::devices::{format_amount, BalanceSign, Device, DeviceId, Place, PlaceId};

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub view: ScreenView,
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    DeviceList(DeviceListView),
    PlaceList(PlaceListView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceListView {
    pub status: ListStatus,
    /// A request for the list is outstanding.
    pub loading: bool,
    /// Device whose places are being fetched.
    pub opening: Option<DeviceId>,
    pub cards: Vec<DeviceCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCard {
    pub device_id: DeviceId,
    pub name: String,
    pub updated_label: String,
    pub place_count: usize,
    /// `None` when the sum does not fit a `Decimal`.
    pub total_balance: Option<Decimal>,
    pub places_label: String,
    pub balance_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceListView {
    pub device_id: DeviceId,
    pub title: String,
    /// A re-fetch of the device is outstanding.
    pub refreshing: bool,
    pub cards: Vec<PlaceCard>,
    pub keypad: Option<KeypadView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCard {
    pub place_id: PlaceId,
    pub balance: Decimal,
    pub balance_label: String,
    pub currency: String,
    pub sign: BalanceSign,
    pub amount_input: String,
    pub inline_error: Option<String>,
    /// Deposit/withdraw controls are disabled while true.
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadView {
    pub place_id: PlaceId,
    pub value: String,
}

impl DeviceCard {
    pub fn from_device(device: &Device) -> Self {
        let total = device.total_balance();
        let balance_label = match (total, device.summary_currency()) {
            (Some(total), Some(currency)) => {
                format!("Total Balance: {} {}", format_amount(total), currency)
            }
            (Some(total), None) => format!("Total Balance: {}", format_amount(total)),
            (None, _) => format!("Total Balance: {}", TOTAL_OUT_OF_RANGE),
        };
        Self {
            device_id: device.id,
            name: device.name.clone(),
            updated_label: device.updated_label(),
            place_count: device.place_count(),
            total_balance: total,
            places_label: format!("Places: {}", device.place_count()),
            balance_label,
        }
    }
}

pub(crate) fn render(controller: &SyncController) -> Screen {
    let view = controller.view_state();
    let banner = controller.notifier.current().cloned();

    let screen_view = match (view.mode, controller.places.as_ref()) {
        (ViewMode::PlaceList, Some(places)) => {
            let device_id = places.device.id;
            let cards = places
                .device
                .places
                .iter()
                .map(|place| place_card(controller, device_id, place))
                .collect();
            let keypad = match (&controller.keypad, view.selected_place_id) {
                (Some(keypad), Some(place_id)) => Some(KeypadView {
                    place_id,
                    value: keypad.value().to_string(),
                }),
                _ => None,
            };
            ScreenView::PlaceList(PlaceListView {
                device_id,
                title: view.selected_device_name.clone(),
                refreshing: controller.is_fetching_device(),
                cards,
                keypad,
            })
        }
        _ => {
            let phase = controller.phase();
            ScreenView::DeviceList(DeviceListView {
                status: controller.list_status(),
                loading: phase == SyncPhase::LoadingDevices,
                opening: match phase {
                    SyncPhase::LoadingPlaces { device_id } => Some(device_id),
                    _ => None,
                },
                cards: controller
                    .devices
                    .devices
                    .iter()
                    .map(DeviceCard::from_device)
                    .collect(),
            })
        }
    };

    Screen {
        view: screen_view,
        banner,
    }
}

fn place_card(controller: &SyncController, device_id: DeviceId, place: &Place) -> PlaceCard {
    let places = controller.places.as_ref();
    PlaceCard {
        place_id: place.place,
        balance: place.balances,
        balance_label: format!("{} {}", format_amount(place.balances), place.currency)
            .trim_end()
            .to_string(),
        currency: place.currency.clone(),
        sign: place.sign(),
        amount_input: places
            .and_then(|p| p.inputs.get(&place.place))
            .cloned()
            .unwrap_or_default(),
        inline_error: places.and_then(|p| p.errors.get(&place.place)).cloned(),
        submitting: controller.is_submitting(device_id, place.place),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn device_card_summarizes_places() {
        let device = Device {
            id: 7,
            name: "Front desk".to_string(),
            updated_at: "2024-03-01T10:15:00Z".to_string(),
            places: vec![
                Place {
                    place: 1,
                    balances: dec!(100),
                    currency: String::new(),
                },
                Place {
                    place: 2,
                    balances: dec!(-30),
                    currency: String::new(),
                },
            ],
        };

        let card = DeviceCard::from_device(&device);
        assert_eq!(card.places_label, "Places: 2");
        assert_eq!(card.balance_label, "Total Balance: 70");
        assert_eq!(card.total_balance, Some(dec!(70)));
    }

    #[test]
    fn device_card_shows_shared_currency() {
        let device = Device {
            id: 1,
            name: "Bar".to_string(),
            updated_at: "not a date".to_string(),
            places: vec![Place {
                place: 1,
                balances: dec!(12.50),
                currency: "KES".to_string(),
            }],
        };

        let card = DeviceCard::from_device(&device);
        assert_eq!(card.balance_label, "Total Balance: 12.5 KES");
        assert_eq!(card.updated_label, "not a date");
    }

    #[test]
    fn device_card_marks_overflowing_total() {
        let place = |id| Place {
            place: id,
            balances: Decimal::MAX,
            currency: "KES".to_string(),
        };
        let device = Device {
            id: 1,
            name: "Vault".to_string(),
            updated_at: "2024-03-01T10:15:00Z".to_string(),
            places: vec![place(1), place(2)],
        };

        let card = DeviceCard::from_device(&device);
        assert_eq!(card.total_balance, None);
        assert_eq!(card.balance_label, "Total Balance: out of range");
        assert_eq!(card.places_label, "Places: 2");
    }
}
