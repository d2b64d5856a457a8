// Tick/price conversion for the discretized price grid.
use crate::domain::constants::{MAX_TICK, MIN_TICK, TICK_BASE};
use crate::domain::error::EngineError;

/// Converts an integer tick to a display price, adjusted for the decimal
/// counts of the two tokens.
///
/// price = 1.0001^tick * 10^(base_decimals - quote_decimals)
pub fn tick_to_price(tick: i32, base_decimals: u32, quote_decimals: u32) -> Result<f64, EngineError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(EngineError::TickOutOfRange(tick));
    }
    let scale = 10f64.powi(base_decimals as i32 - quote_decimals as i32);
    Ok(TICK_BASE.powi(tick) * scale)
}

/// Inverse of [`tick_to_price`]: nearest tick for a display price.
pub fn price_to_tick(price: f64, base_decimals: u32, quote_decimals: u32) -> Result<i32, EngineError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(EngineError::PriceUnavailable);
    }
    let scale = 10f64.powi(base_decimals as i32 - quote_decimals as i32);
    let tick = ((price / scale).ln() / TICK_BASE.ln()).round() as i64;
    if !(MIN_TICK as i64..=MAX_TICK as i64).contains(&tick) {
        return Err(EngineError::TickOutOfRange(tick.clamp(i32::MIN as i64, i32::MAX as i64) as i32));
    }
    Ok(tick as i32)
}

/// Snaps a tick down onto the market's tick-spacing grid. Every tick that
/// enters an order must be aligned first.
pub fn align_to_spacing(tick: i32, spacing: i32) -> Result<i32, EngineError> {
    if spacing <= 0 {
        return Err(EngineError::InvalidTickSpacing(spacing));
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(EngineError::TickOutOfRange(tick));
    }
    Ok(tick.div_euclid(spacing) * spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_at_tick_zero_is_decimal_scale() {
        assert_eq!(tick_to_price(0, 8, 8).unwrap(), 1.0);
        assert_eq!(tick_to_price(0, 6, 8).unwrap(), 0.01);
        assert_eq!(tick_to_price(0, 8, 6).unwrap(), 100.0);
    }

    #[test]
    fn one_tick_moves_price_by_one_basis_point_of_grid() {
        let p = tick_to_price(1, 8, 8).unwrap();
        assert!((p - 1.0001).abs() < 1e-12);
    }

    #[test]
    fn tick_out_of_range_is_rejected() {
        assert!(tick_to_price(MAX_TICK + 1, 8, 8).is_err());
        assert!(tick_to_price(MIN_TICK - 1, 8, 8).is_err());
    }

    #[test]
    fn price_to_tick_inverts_tick_to_price() {
        for tick in [-50_000, -1, 0, 1, 6932, 100_000] {
            let price = tick_to_price(tick, 8, 8).unwrap();
            assert_eq!(price_to_tick(price, 8, 8).unwrap(), tick);
        }
    }

    #[test]
    fn alignment_floors_onto_grid() {
        assert_eq!(align_to_spacing(105, 10).unwrap(), 100);
        assert_eq!(align_to_spacing(100, 10).unwrap(), 100);
        // Negative ticks floor toward negative infinity, not toward zero
        assert_eq!(align_to_spacing(-105, 10).unwrap(), -110);
        assert!(align_to_spacing(100, 0).is_err());
    }
}
