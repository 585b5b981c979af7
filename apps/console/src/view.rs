//! Text rendering of the controller's [`Screen`].

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use paydesk_core::devices::BalanceSign;
use paydesk_core::sync::{
    BannerKind, DeviceListView, ListStatus, PlaceCard, PlaceListView, Screen, ScreenView,
};

/// Draws a screen. `colored` enables ANSI colors.
pub fn draw(screen: &Screen, colored: bool) -> String {
    let mut out = String::new();

    if let Some(banner) = &screen.banner {
        let line = match banner.kind {
            BannerKind::Success => format!("[ok] {}", banner.message),
            BannerKind::Error => format!("[error] {}", banner.message),
        };
        let line = match (banner.kind, colored) {
            (BannerKind::Success, true) => line.green().bold().to_string(),
            (BannerKind::Error, true) => line.red().bold().to_string(),
            _ => line,
        };
        writeln!(out, "{}", line).ok();
        out.push('\n');
    }

    match &screen.view {
        ScreenView::DeviceList(view) => draw_devices(&mut out, view),
        ScreenView::PlaceList(view) => draw_places(&mut out, view, colored),
    }
    out
}

fn draw_devices(out: &mut String, view: &DeviceListView) {
    out.push_str("== Devices ==\n");
    match view.status {
        ListStatus::Loading => out.push_str("Loading devices...\n"),
        ListStatus::NoDevices => out.push_str("No devices found\n"),
        ListStatus::LoadFailed => out.push_str("(device list unavailable)\n"),
        ListStatus::Ready => {}
    }
    for card in &view.cards {
        writeln!(
            out,
            "#{} {}\n    Updated: {}\n    {} | {}",
            card.device_id, card.name, card.updated_label, card.places_label, card.balance_label
        )
        .ok();
    }
    if view.loading && view.status != ListStatus::Loading {
        out.push_str("Refreshing...\n");
    }
    if let Some(device_id) = view.opening {
        writeln!(out, "Opening device #{}...", device_id).ok();
    }
}

fn draw_places(out: &mut String, view: &PlaceListView, colored: bool) {
    writeln!(out, "== {} (#{}) ==", view.title, view.device_id).ok();
    if view.cards.is_empty() {
        out.push_str("This device has no places\n");
    }
    for card in &view.cards {
        draw_place(out, card, colored);
    }
    if let Some(keypad) = &view.keypad {
        writeln!(
            out,
            "Keypad -> place {}: [{}]",
            keypad.place_id,
            if keypad.value.is_empty() {
                " "
            } else {
                keypad.value.as_str()
            }
        )
        .ok();
    }
    if view.refreshing {
        out.push_str("Refreshing...\n");
    }
}

fn draw_place(out: &mut String, card: &PlaceCard, colored: bool) {
    let balance = match (card.sign, colored) {
        (BalanceSign::Positive, true) => card.balance_label.green().to_string(),
        (BalanceSign::Negative, true) => card.balance_label.red().to_string(),
        _ => card.balance_label.clone(),
    };
    let controls = if card.submitting {
        "(submitting...)"
    } else {
        "[deposit] [withdraw]"
    };
    writeln!(
        out,
        "Place {}: {}\n    Amount: [{}] {}",
        card.place_id, balance, card.amount_input, controls
    )
    .ok();
    if let Some(error) = &card.inline_error {
        let line = format!("    ! {}", error);
        if colored {
            writeln!(out, "{}", line.red()).ok();
        } else {
            writeln!(out, "{}", line).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydesk_core::sync::{Banner, DeviceCard, KeypadView};
    use rust_decimal_macros::dec;

    fn place_card(place_id: i64, error: Option<&str>, submitting: bool) -> PlaceCard {
        PlaceCard {
            place_id,
            balance: dec!(-30),
            balance_label: "-30 KES".to_string(),
            currency: "KES".to_string(),
            sign: BalanceSign::Negative,
            amount_input: "50".to_string(),
            inline_error: error.map(str::to_string),
            submitting,
        }
    }

    #[test]
    fn empty_list_is_distinct_from_failure() {
        let screen = |status| Screen {
            view: ScreenView::DeviceList(DeviceListView {
                status,
                loading: false,
                opening: None,
                cards: vec![],
            }),
            banner: None,
        };
        assert!(draw(&screen(ListStatus::NoDevices), false).contains("No devices found"));
        assert!(!draw(&screen(ListStatus::LoadFailed), false).contains("No devices found"));
    }

    #[test]
    fn device_cards_show_summary() {
        let screen = Screen {
            view: ScreenView::DeviceList(DeviceListView {
                status: ListStatus::Ready,
                loading: false,
                opening: None,
                cards: vec![DeviceCard {
                    device_id: 7,
                    name: "Front desk".to_string(),
                    updated_label: "2024-03-01 10:15:00".to_string(),
                    place_count: 2,
                    total_balance: Some(dec!(70)),
                    places_label: "Places: 2".to_string(),
                    balance_label: "Total Balance: 70 KES".to_string(),
                }],
            }),
            banner: Some(Banner {
                kind: BannerKind::Error,
                message: "Couldn't load the device".to_string(),
                generation: 1,
            }),
        };
        let text = draw(&screen, false);
        assert!(text.starts_with("[error] Couldn't load the device"));
        assert!(text.contains("#7 Front desk"));
        assert!(text.contains("Places: 2 | Total Balance: 70 KES"));
    }

    #[test]
    fn place_cards_show_inline_error_and_disabled_controls() {
        let screen = Screen {
            view: ScreenView::PlaceList(PlaceListView {
                device_id: 7,
                title: "Front desk".to_string(),
                refreshing: false,
                cards: vec![
                    place_card(3, Some("Insufficient balance"), false),
                    place_card(4, None, true),
                ],
                keypad: Some(KeypadView {
                    place_id: 4,
                    value: "2.5".to_string(),
                }),
            }),
            banner: None,
        };
        let text = draw(&screen, false);
        assert!(text.contains("== Front desk (#7) =="));
        assert!(text.contains("Place 3: -30 KES\n    Amount: [50] [deposit] [withdraw]"));
        assert!(text.contains("    ! Insufficient balance"));
        assert!(text.contains("Place 4: -30 KES\n    Amount: [50] (submitting...)"));
        assert!(text.contains("Keypad -> place 4: [2.5]"));
    }
}
