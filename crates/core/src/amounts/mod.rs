//! Amounts module - input validation and keypad capture.

mod amount_validator;
mod keypad;

pub use amount_validator::{validate_amount, validate_value, PositiveAmount};
pub use keypad::{Keypad, KeypadKey};
