//! Line adapter: turns what the operator types into controller commands.
//!
//! No business logic lives here. Anything that is not a well-formed command
//! is reported back and never reaches the controller.

use paydesk_core::amounts::KeypadKey;
use paydesk_core::devices::{DeltaDirection, DeviceId, PlaceId};
use paydesk_core::sync::Command;

pub const USAGE: &str = "\
Commands:
  devices | refresh             reload the device list
  open <device>                 show the places of a device
  back                          return to the device list
  amount <place> <value>        set the amount input of a place
  deposit <place> [value]       deposit the amount input (or value)
  withdraw <place> [value]      withdraw the amount input (or value)
  keypad <place>                open the keypad for a place
  k <key>                       keypad key: 0-9, '.', del, clear
  deposit | withdraw            submit the keypad amount
  close                         close the keypad
  dismiss                       hide the banner
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Commands(Vec<Command>),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parses one line. `keypad_open` lets bare `deposit`/`withdraw` submit the keypad.
pub fn parse_line(line: &str, keypad_open: bool) -> Input {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Input::Empty;
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("devices" | "refresh" | "r", []) => single(Command::RefreshDevices),
        ("open" | "o", [device]) => match parse_id::<DeviceId>(device) {
            Some(id) => single(Command::SelectDevice(id)),
            None => Input::Invalid(format!("Not a device id: {}", device)),
        },
        ("back" | "b", []) => single(Command::Back),
        ("amount" | "a", [place, value]) => match parse_id::<PlaceId>(place) {
            Some(place_id) => single(Command::SetAmount {
                place_id,
                raw: value.to_string(),
            }),
            None => Input::Invalid(format!("Not a place number: {}", place)),
        },
        ("deposit" | "d", rest) => submit(DeltaDirection::Deposit, rest, keypad_open),
        ("withdraw" | "w", rest) => submit(DeltaDirection::Withdraw, rest, keypad_open),
        ("keypad", [place]) => match parse_id::<PlaceId>(place) {
            Some(place_id) => single(Command::OpenKeypad { place_id }),
            None => Input::Invalid(format!("Not a place number: {}", place)),
        },
        ("k", [key]) => match KeypadKey::from_label(&key.to_ascii_lowercase()) {
            Some(key) => single(Command::KeypadKey(key)),
            None => Input::Invalid(format!("Unknown keypad key: {}", key)),
        },
        ("close", []) => single(Command::CloseKeypad),
        ("dismiss", []) => single(Command::DismissBanner),
        ("help" | "?", _) => Input::Help,
        ("quit" | "exit" | "q", _) => Input::Quit,
        _ => Input::Invalid(format!("Unknown command: {}", line.trim())),
    }
}

fn submit(direction: DeltaDirection, args: &[&str], keypad_open: bool) -> Input {
    match args {
        [] if keypad_open => single(Command::KeypadSubmit(direction)),
        [] => Input::Invalid("Which place? Open the keypad or give a place number".to_string()),
        [place, rest @ ..] if rest.len() <= 1 => {
            let Some(place_id) = parse_id::<PlaceId>(place) else {
                return Input::Invalid(format!("Not a place number: {}", place));
            };
            let mut commands = Vec::with_capacity(2);
            if let Some(value) = rest.first() {
                commands.push(Command::SetAmount {
                    place_id,
                    raw: value.to_string(),
                });
            }
            commands.push(Command::Submit {
                place_id,
                direction,
            });
            Input::Commands(commands)
        }
        _ => Input::Invalid("Too many arguments".to_string()),
    }
}

fn single(command: Command) -> Input {
    Input::Commands(vec![command])
}

fn parse_id<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim_start_matches('#').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_commands() {
        assert_eq!(
            parse_line("open 7", false),
            Input::Commands(vec![Command::SelectDevice(7)])
        );
        assert_eq!(parse_line("back", false), single(Command::Back));
        assert_eq!(parse_line("refresh", false), single(Command::RefreshDevices));
        assert_eq!(parse_line("   ", false), Input::Empty);
    }

    #[test]
    fn deposit_with_value_sets_amount_first() {
        assert_eq!(
            parse_line("deposit 3 50", false),
            Input::Commands(vec![
                Command::SetAmount {
                    place_id: 3,
                    raw: "50".to_string()
                },
                Command::Submit {
                    place_id: 3,
                    direction: DeltaDirection::Deposit
                },
            ])
        );
    }

    #[test]
    fn amount_text_is_passed_through_unvalidated() {
        assert_eq!(
            parse_line("withdraw 3 abc", false),
            Input::Commands(vec![
                Command::SetAmount {
                    place_id: 3,
                    raw: "abc".to_string()
                },
                Command::Submit {
                    place_id: 3,
                    direction: DeltaDirection::Withdraw
                },
            ])
        );
    }

    #[test]
    fn bare_submit_needs_the_keypad() {
        assert_eq!(
            parse_line("deposit", true),
            single(Command::KeypadSubmit(DeltaDirection::Deposit))
        );
        assert!(matches!(parse_line("deposit", false), Input::Invalid(_)));
    }

    #[test]
    fn keypad_keys() {
        assert_eq!(
            parse_line("k 7", true),
            single(Command::KeypadKey(KeypadKey::Digit(7)))
        );
        assert_eq!(
            parse_line("k DEL", true),
            single(Command::KeypadKey(KeypadKey::Backspace))
        );
        assert!(matches!(parse_line("k x", true), Input::Invalid(_)));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(parse_line("open seven", false), Input::Invalid(_)));
        assert!(matches!(parse_line("deposit 3 5 6", false), Input::Invalid(_)));
        assert!(matches!(parse_line("launch", false), Input::Invalid(_)));
        assert_eq!(parse_line("quit", false), Input::Quit);
    }
}
