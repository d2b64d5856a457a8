// Wire models for backend RPC responses
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::enums::{FillVenue, OrderStatus, Side};
use crate::domain::model::market::PoolState;
use crate::domain::model::order::OrderReceipt;
use crate::domain::model::quote::{FeeBreakdown, Quote, VenueFill};

#[derive(Debug, Deserialize)]
pub struct FeeBreakdownDto {
    pub protocol_fee: f64,
    pub liquidity_fee: f64,
}

#[derive(Debug, Deserialize)]
pub struct FillDto {
    pub venue: FillVenue,
    pub amount_in: f64,
    pub amount_out: f64,
}

#[derive(Debug, Deserialize)]
pub struct QuoteDto {
    pub market: String,
    pub side: Side,
    pub amount_in: f64,
    pub amount_out: f64,
    pub effective_tick: i32,
    pub price_impact_pct: f64,
    pub fees: FeeBreakdownDto,
    #[serde(default)]
    pub fills: Vec<FillDto>,
    pub quoted_at: DateTime<Utc>,
}

impl QuoteDto {
    pub fn into_domain(self) -> Quote {
        Quote {
            market: self.market,
            side: self.side,
            amount_in: self.amount_in,
            amount_out: self.amount_out,
            effective_tick: self.effective_tick,
            price_impact_pct: self.price_impact_pct,
            fees: FeeBreakdown {
                protocol: self.fees.protocol_fee,
                liquidity: self.fees.liquidity_fee,
            },
            fills: self
                .fills
                .into_iter()
                .map(|fill| VenueFill {
                    venue: fill.venue,
                    amount_in: fill.amount_in,
                    amount_out: fill.amount_out,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PoolStateDto {
    pub tick: Option<i32>,
    pub range_lower: i32,
    pub range_upper: i32,
    #[serde(default)]
    pub liquidity: f64,
}

impl PoolStateDto {
    pub fn into_domain(self) -> PoolState {
        PoolState {
            tick: self.tick,
            range_lower: self.range_lower,
            range_upper: self.range_upper,
            liquidity: self.liquidity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderReceiptDto {
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub filled_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl OrderReceiptDto {
    pub fn into_domain(self) -> OrderReceipt {
        OrderReceipt {
            order_id: self.order_id,
            status: self.status,
            filled_amount: self.filled_amount,
            created_at: self.created_at,
        }
    }
}
