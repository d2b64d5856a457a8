use serde::Deserialize;

/// A token leg of a market: display symbol plus on-ledger decimal count.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u32,
}

/// Static description of a trading pair. Amounts are denominated in the
/// base token, totals in the quote token.
#[derive(Clone, Debug, Deserialize)]
pub struct Market {
    pub name: String,
    pub base: TokenInfo,
    pub quote: TokenInfo,
    pub tick_spacing: i32,
}

/// Where the current price sits relative to the active liquidity range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangePosition {
    BelowRange,
    InRange,
    AboveRange,
}

/// Pool snapshot refreshed by the polling task. The tick is optional:
/// a market without an initialized pool reports no reference price.
#[derive(Clone, Debug)]
pub struct PoolState {
    pub tick: Option<i32>,
    pub range_lower: i32,
    pub range_upper: i32,
    pub liquidity: f64,
}

impl PoolState {
    /// One-sided liquidity check: price at or beyond a range bound means
    /// only one of the two tokens participates in further deposits.
    pub fn range_position(&self) -> Option<RangePosition> {
        let tick = self.tick?;
        if tick <= self.range_lower {
            Some(RangePosition::BelowRange)
        } else if tick >= self.range_upper {
            Some(RangePosition::AboveRange)
        } else {
            Some(RangePosition::InRange)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(tick: Option<i32>) -> PoolState {
        PoolState { tick, range_lower: -100, range_upper: 100, liquidity: 1_000.0 }
    }

    #[test]
    fn range_position_classifies_bounds_inclusively() {
        assert_eq!(pool(Some(0)).range_position(), Some(RangePosition::InRange));
        assert_eq!(pool(Some(-100)).range_position(), Some(RangePosition::BelowRange));
        assert_eq!(pool(Some(100)).range_position(), Some(RangePosition::AboveRange));
        assert_eq!(pool(Some(150)).range_position(), Some(RangePosition::AboveRange));
        assert_eq!(pool(None).range_position(), None);
    }
}
