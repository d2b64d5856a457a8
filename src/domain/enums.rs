use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

/// Which side of the market the form is trading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

/// Venue an individual quote fill executes against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillVenue {
    Book,
    Pool,
}

impl FillVenue {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "book" => Ok(FillVenue::Book),
            "pool" => Ok(FillVenue::Pool),
            _ => Err(anyhow!("Unknown fill venue: {}", s)),
        }
    }
}

// Status reported back by the exchange for a submitted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Placed,
    PartiallyFilled,
    Filled,
    Rejected,
}

impl OrderStatus {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "placed" => Ok(OrderStatus::Placed),
            "partially_filled" => Ok(OrderStatus::PartiallyFilled),
            "filled" => Ok(OrderStatus::Filled),
            "rejected" => Ok(OrderStatus::Rejected),
            _ => Err(anyhow!("Unknown order status: {}", s)),
        }
    }
}

/// Which of the two linked form fields the user touched last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditedField {
    Amount,
    Total,
}

/// Lifecycle of a form session.
///
/// Idle -> Debouncing -> Quoting -> Quoted -> (Stale -> Quoting)
///      -> Submitting -> (Idle | Error)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Debouncing,
    Quoting,
    Quoted,
    Stale,
    Submitting,
    Error,
}
