//! Point-of-sale payment arithmetic.

use serde::{Deserialize, Serialize};

/// Payment method accepted at the point of sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash; the only method with tendered-amount and change handling.
    #[default]
    Cash,

    /// QR transfer referencing an external transaction.
    Qr,

    /// Card payment.
    Card,
}

impl PaymentMethod {
    /// Parse a wire value case-insensitively; unknown or empty input reads
    /// as cash.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "QR" => Self::Qr,
            "CARD" => Self::Card,
            _ => Self::Cash,
        }
    }

    /// Uppercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Qr => "QR",
            Self::Card => "CARD",
        }
    }
}

/// Coerce a money input: non-finite becomes zero, negatives floor at zero.
#[must_use]
pub fn money(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Payment state for a ticket checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Selected method.
    #[serde(default)]
    pub method: PaymentMethod,

    /// Amount handed over by the customer; meaningful for cash only.
    #[serde(default)]
    pub amount_tendered: f64,

    /// External transaction reference; meaningful for QR only.
    #[serde(default)]
    pub qr_reference: Option<String>,

    /// Ticket-wide discount subtracted from the subtotal.
    #[serde(default)]
    pub discount_total: f64,
}

impl Payment {
    /// Switch method, resetting fields that no longer apply.
    pub fn set_method(&mut self, method: PaymentMethod) {
        self.method = method;

        if method != PaymentMethod::Cash {
            self.amount_tendered = 0.0;
        }

        if method != PaymentMethod::Qr {
            self.qr_reference = None;
        }
    }

    /// Amount owed after the discount.
    #[must_use]
    pub fn total_due(&self, subtotal: f64) -> f64 {
        (money(subtotal) - money(self.discount_total)).max(0.0)
    }

    /// Change owed back to the customer; zero for non-cash methods.
    #[must_use]
    pub fn change_due(&self, subtotal: f64) -> f64 {
        if self.method != PaymentMethod::Cash {
            return 0.0;
        }

        (money(self.amount_tendered) - self.total_due(subtotal)).max(0.0)
    }

    /// Whether the payment covers the amount due. Non-cash methods are
    /// settled externally and always cover.
    #[must_use]
    pub fn covers(&self, subtotal: f64) -> bool {
        self.method != PaymentMethod::Cash
            || money(self.amount_tendered) >= self.total_due(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_defaults_to_cash() {
        assert_eq!(PaymentMethod::parse("qr"), PaymentMethod::Qr);
        assert_eq!(PaymentMethod::parse(" CARD "), PaymentMethod::Card);
        assert_eq!(PaymentMethod::parse(""), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse("voucher"), PaymentMethod::Cash);
    }

    #[test]
    fn money_floors_at_zero_and_drops_non_finite() {
        assert_eq!(money(12.5), 12.5);
        assert_eq!(money(-3.0), 0.0);
        assert_eq!(money(f64::NAN), 0.0);
    }

    #[test]
    fn switching_away_from_cash_resets_the_tendered_amount() {
        let mut payment = Payment {
            amount_tendered: 50.0,
            ..Payment::default()
        };

        payment.set_method(PaymentMethod::Qr);

        assert_eq!(payment.amount_tendered, 0.0);
    }

    #[test]
    fn switching_away_from_qr_clears_the_reference() {
        let mut payment = Payment {
            method: PaymentMethod::Qr,
            qr_reference: Some("TX-1".to_string()),
            ..Payment::default()
        };

        payment.set_method(PaymentMethod::Cash);

        assert_eq!(payment.qr_reference, None);
    }

    #[test]
    fn total_due_subtracts_the_discount_and_floors_at_zero() {
        let payment = Payment {
            discount_total: 15.0,
            ..Payment::default()
        };

        assert_eq!(payment.total_due(100.0), 85.0);
        assert_eq!(payment.total_due(10.0), 0.0);
    }

    #[test]
    fn change_due_applies_to_cash_only() {
        let cash = Payment {
            amount_tendered: 100.0,
            ..Payment::default()
        };

        let qr = Payment {
            method: PaymentMethod::Qr,
            ..Payment::default()
        };

        assert_eq!(cash.change_due(80.0), 20.0);
        assert_eq!(cash.change_due(120.0), 0.0);
        assert_eq!(qr.change_due(80.0), 0.0);
    }

    #[test]
    fn covers_checks_cash_against_the_discounted_total() {
        let payment = Payment {
            amount_tendered: 90.0,
            discount_total: 10.0,
            ..Payment::default()
        };

        assert!(payment.covers(100.0));
        assert!(!payment.covers(120.0));

        let card = Payment {
            method: PaymentMethod::Card,
            ..Payment::default()
        };

        assert!(card.covers(500.0));
    }
}
