// Domain model for quote requests and order submission
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::enums::{EditedField, OrderStatus, OrderType, Side};

/// Which token a requested amount is denominated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Base,
    Quote,
}

impl From<EditedField> for Denomination {
    fn from(field: EditedField) -> Self {
        match field {
            EditedField::Amount => Denomination::Base,
            EditedField::Total => Denomination::Quote,
        }
    }
}

/// Pricing request sent to the backend. The amount carries the token it is
/// denominated in so either form field can drive the quote.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteRequest {
    pub market: String,
    pub side: Side,
    pub amount: f64,
    pub denomination: Denomination,
}

// OrderRequest is a send-side intent, distinct from any exchange echo.
// Amounts are optional because a one-sided-liquidity form submits only the
// enabled token's amount.
#[derive(Clone, Debug)]
pub struct OrderRequest {
    pub market: String,
    pub side: Side,
    pub order_type: OrderType,
    pub amount: Option<f64>,
    pub total: Option<f64>,
    pub limit_tick: Option<i32>,
}

/// Exchange acknowledgement of a submitted order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub status: OrderStatus,
    pub filled_amount: f64,
    pub created_at: DateTime<Utc>,
}
