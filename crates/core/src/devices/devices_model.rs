//! Device and place domain models, as served by the device API.

use chrono::{DateTime, Local, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amounts::PositiveAmount;

/// Server-assigned device identifier.
pub type DeviceId = i64;

/// Place number, unique within its owning device.
pub type PlaceId = i64;

/// A managed unit exposing a set of numbered places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// ISO-8601 timestamp, kept verbatim from the server.
    pub updated_at: String,
    /// Server response order, preserved when rendering.
    #[serde(default)]
    pub places: Vec<Place>,
}

/// A numbered slot under a device holding an independent balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place: PlaceId,
    /// Signed, in whatever unit the server uses. Never converted locally.
    pub balances: Decimal,
    pub currency: String,
}

impl Device {
    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Arithmetic sum of all place balances, or `None` if it overflows.
    pub fn total_balance(&self) -> Option<Decimal> {
        self.places
            .iter()
            .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.balances))
    }

    /// Currency shared by every place, if there is exactly one.
    pub fn summary_currency(&self) -> Option<&str> {
        let first = self.places.first()?.currency.as_str();
        self.places
            .iter()
            .all(|p| p.currency == first)
            .then_some(first)
            .filter(|c| !c.is_empty())
    }

    pub fn find_place(&self, place_id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.place == place_id)
    }

    /// `updated_at` rendered in the local time zone.
    pub fn updated_label(&self) -> String {
        format_timestamp(&self.updated_at, &Local)
    }
}

/// Sign of a balance, used to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSign {
    Positive,
    Zero,
    Negative,
}

impl Place {
    pub fn sign(&self) -> BalanceSign {
        if self.balances.is_zero() {
            BalanceSign::Zero
        } else if self.balances.is_sign_negative() {
            BalanceSign::Negative
        } else {
            BalanceSign::Positive
        }
    }
}

/// Operation direction, encoded into the sign of the delta sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    Deposit,
    Withdraw,
}

impl DeltaDirection {
    pub fn signed(self, amount: PositiveAmount) -> Decimal {
        match self {
            Self::Deposit => amount.value(),
            Self::Withdraw => -amount.value(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdrawal",
        }
    }
}

/// A balance change waiting on the server. At most one per place at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub device_id: DeviceId,
    pub place_id: PlaceId,
    pub delta: Decimal,
}

impl PendingMutation {
    pub fn new(
        device_id: DeviceId,
        place_id: PlaceId,
        direction: DeltaDirection,
        amount: PositiveAmount,
    ) -> Self {
        Self {
            device_id,
            place_id,
            delta: direction.signed(amount),
        }
    }

    pub fn direction(&self) -> DeltaDirection {
        if self.delta.is_sign_negative() {
            DeltaDirection::Withdraw
        } else {
            DeltaDirection::Deposit
        }
    }
}

/// Formats an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`.
/// Unparsable input is returned unchanged.
pub fn format_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Normalized display of an amount: `70`, `70.5`, `-30`.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
