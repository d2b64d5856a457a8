// Domain model for priced order previews
use serde::{Deserialize, Serialize};

use crate::domain::enums::{FillVenue, Side};

/// Fees charged on the quoted trade, denominated in the quote token.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub protocol: f64,
    pub liquidity: f64,
}

impl FeeBreakdown {
    pub fn total(&self) -> f64 {
        self.protocol + self.liquidity
    }
}

/// A slice of the quoted trade executing against one venue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VenueFill {
    pub venue: FillVenue,
    pub amount_in: f64,
    pub amount_out: f64,
}

/// A priced preview of an order's expected fills across venues.
/// Immutable once received; superseded wholesale by the next accepted quote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub market: String,
    pub side: Side,
    pub amount_in: f64,
    pub amount_out: f64,
    pub effective_tick: i32,
    pub price_impact_pct: f64,
    pub fees: FeeBreakdown,
    pub fills: Vec<VenueFill>,
}

impl Quote {
    /// Portion of the input filled against the order book.
    pub fn book_volume(&self) -> f64 {
        self.fills
            .iter()
            .filter(|f| f.venue == FillVenue::Book)
            .map(|f| f.amount_in)
            .sum()
    }

    /// Portion of the input filled against liquidity pools.
    pub fn pool_volume(&self) -> f64 {
        self.fills
            .iter()
            .filter(|f| f.venue == FillVenue::Pool)
            .map(|f| f.amount_in)
            .sum()
    }

    /// Relative output deviation against an earlier quote, in percent.
    /// Used for the pre-submission drift warning.
    pub fn output_deviation_pct(&self, earlier: &Quote) -> f64 {
        if earlier.amount_out == 0.0 {
            return 0.0;
        }
        ((self.amount_out - earlier.amount_out).abs() / earlier.amount_out) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(amount_out: f64) -> Quote {
        Quote {
            market: "ICP/ckUSDC".to_string(),
            side: Side::Buy,
            amount_in: 100.0,
            amount_out,
            effective_tick: 0,
            price_impact_pct: 0.1,
            fees: FeeBreakdown { protocol: 0.05, liquidity: 0.25 },
            fills: vec![
                VenueFill { venue: FillVenue::Book, amount_in: 60.0, amount_out: 59.0 },
                VenueFill { venue: FillVenue::Pool, amount_in: 40.0, amount_out: 39.5 },
            ],
        }
    }

    #[test]
    fn venue_breakdown_sums_per_venue() {
        let q = quote(98.5);
        assert_eq!(q.book_volume(), 60.0);
        assert_eq!(q.pool_volume(), 40.0);
        assert_eq!(q.fees.total(), 0.3);
    }

    #[test]
    fn output_deviation_is_symmetric_percent() {
        let old = quote(100.0);
        assert!((quote(99.0).output_deviation_pct(&old) - 1.0).abs() < 1e-12);
        assert!((quote(101.0).output_deviation_pct(&old) - 1.0).abs() < 1e-12);
        assert_eq!(quote(100.0).output_deviation_pct(&old), 0.0);
    }
}
