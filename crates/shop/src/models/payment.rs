//! Payment domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hardstop_core::{PaymentId, Price};

/// A payment owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    /// Unique payment ID. Never reassigned.
    pub id: PaymentId,
    /// Payment method label (e.g. "Credit Card").
    pub method: String,
    /// When the payment was made.
    pub paid_at: DateTime<Utc>,
    /// Amount paid.
    pub amount: Price,
    /// Whether the payment went through.
    pub validated: bool,
}

impl Payment {
    /// Build a new payment with a fresh ID.
    #[must_use]
    pub fn new(input: PaymentInput) -> Self {
        Self {
            id: PaymentId::generate(),
            method: input.method,
            paid_at: input.paid_at,
            amount: input.amount,
            validated: input.validated,
        }
    }

    /// Overwrite every field except the ID.
    pub fn apply(&mut self, input: PaymentInput) {
        self.method = input.method;
        self.paid_at = input.paid_at;
        self.amount = input.amount;
        self.validated = input.validated;
    }
}

/// Payment details supplied with an order request.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInput {
    /// Payment method label.
    pub method: String,
    /// When the payment was made.
    pub paid_at: DateTime<Utc>,
    /// Amount paid.
    pub amount: Price,
    /// Whether the payment went through.
    #[serde(default)]
    pub validated: bool,
}
