//! Tests for device domain models.

#[cfg(test)]
mod tests {
    use crate::amounts::PositiveAmount;
    use crate::devices::{
        format_amount, format_timestamp, BalanceSign, DeltaDirection, Device, PendingMutation,
        Place,
    };
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn place(id: i64, balance: rust_decimal::Decimal, currency: &str) -> Place {
        Place {
            place: id,
            balances: balance,
            currency: currency.to_string(),
        }
    }

    fn device(places: Vec<Place>) -> Device {
        Device {
            id: 7,
            name: "Kiosk".to_string(),
            updated_at: "2024-03-01T10:15:00Z".to_string(),
            places,
        }
    }

    // ==================== Deserialization ====================

    #[test]
    fn test_device_deserializes_server_payload() {
        let json = r#"{
            "id": 7,
            "name": "Front desk",
            "updated_at": "2024-03-01T10:15:00Z",
            "places": [
                {"place": 1, "balances": 100, "currency": "KES"},
                {"place": 2, "balances": -30.5, "currency": "KES"}
            ]
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();

        assert_eq!(device.id, 7);
        assert_eq!(device.name, "Front desk");
        assert_eq!(device.places.len(), 2);
        assert_eq!(device.places[0].place, 1);
        assert_eq!(device.places[0].balances, dec!(100));
        assert_eq!(device.places[1].balances, dec!(-30.5));
    }

    #[test]
    fn test_device_without_places_field_has_no_places() {
        let json = r#"{"id": 1, "name": "Empty", "updated_at": "2024-01-01T00:00:00Z"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert!(device.places.is_empty());
        assert_eq!(device.total_balance(), Some(dec!(0)));
    }

    #[test]
    fn test_place_order_is_preserved() {
        let json = r#"{"id": 1, "name": "A", "updated_at": "x", "places": [
            {"place": 3, "balances": 1, "currency": "KES"},
            {"place": 1, "balances": 2, "currency": "KES"},
            {"place": 2, "balances": 3, "currency": "KES"}
        ]}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        let order: Vec<i64> = device.places.iter().map(|p| p.place).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    // ==================== Summaries ====================

    #[test]
    fn test_total_balance_is_sum_of_places() {
        let d = device(vec![place(1, dec!(100), "KES"), place(2, dec!(-30), "KES")]);
        assert_eq!(d.total_balance(), Some(dec!(70)));
        assert_eq!(d.place_count(), 2);
        assert_eq!(d.total_balance().map(format_amount).as_deref(), Some("70"));
    }

    #[test]
    fn test_total_balance_overflow_is_none() {
        let json = r#"{"id": 1, "name": "Vault", "updated_at": "x", "places": [
            {"place": 1, "balances": 5e28, "currency": "KES"},
            {"place": 2, "balances": 5e28, "currency": "KES"}
        ]}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.total_balance(), None);
    }

    #[test]
    fn test_summary_currency() {
        let same = device(vec![place(1, dec!(1), "KES"), place(2, dec!(2), "KES")]);
        assert_eq!(same.summary_currency(), Some("KES"));

        let mixed = device(vec![place(1, dec!(1), "KES"), place(2, dec!(2), "USD")]);
        assert_eq!(mixed.summary_currency(), None);

        assert_eq!(device(vec![]).summary_currency(), None);
    }

    #[test]
    fn test_balance_sign() {
        assert_eq!(place(1, dec!(5), "KES").sign(), BalanceSign::Positive);
        assert_eq!(place(1, dec!(0), "KES").sign(), BalanceSign::Zero);
        assert_eq!(place(1, dec!(-0.01), "KES").sign(), BalanceSign::Negative);
    }

    // ==================== Formatting ====================

    #[test]
    fn test_format_amount_normalizes_scale() {
        assert_eq!(format_amount(dec!(70.50)), "70.5");
        assert_eq!(format_amount(dec!(-30.00)), "-30");
        assert_eq!(format_amount(dec!(0.25)), "0.25");
    }

    #[test]
    fn test_format_timestamp_in_utc() {
        assert_eq!(
            format_timestamp("2024-03-01T10:15:00+02:00", &Utc),
            "2024-03-01 08:15:00"
        );
    }

    #[test]
    fn test_format_timestamp_keeps_unparsable_input() {
        assert_eq!(format_timestamp("yesterday", &Utc), "yesterday");
    }

    // ==================== Mutations ====================

    #[test]
    fn test_direction_is_encoded_into_delta_sign() {
        let amount = PositiveAmount::parse("50").unwrap();
        let deposit = PendingMutation::new(7, 3, DeltaDirection::Deposit, amount);
        let withdraw = PendingMutation::new(7, 3, DeltaDirection::Withdraw, amount);

        assert_eq!(deposit.delta, dec!(50));
        assert_eq!(withdraw.delta, dec!(-50));
        assert_eq!(deposit.direction(), DeltaDirection::Deposit);
        assert_eq!(withdraw.direction(), DeltaDirection::Withdraw);
    }
}
