// Bidirectional amount <-> total derivation for the order-entry form.
use log::debug;

use crate::domain::enums::EditedField;
use crate::domain::model::amounts::{format_amount, round_to_decimals, AmountPair};
use crate::domain::model::market::{Market, PoolState, RangePosition};
use crate::domain::model::tick::tick_to_price;

/// Field disabled under one-sided liquidity, if any.
///
/// Price below the active range leaves the pool accepting only base-token
/// deposits, so the quote-denominated total is disabled; above the range
/// only the quote token participates and the base amount is disabled.
pub fn disabled_field(pool: &PoolState) -> Option<EditedField> {
    match pool.range_position()? {
        RangePosition::BelowRange => Some(EditedField::Total),
        RangePosition::AboveRange => Some(EditedField::Amount),
        RangePosition::InRange => None,
    }
}

/// Recomputes the derived field of the pair from the last-edited one using
/// the pool's reference tick.
///
/// Skips linking when the tick is unavailable (the opposing field keeps its
/// last value) and when the edited value does not parse. Under one-sided
/// liquidity the disabled field is forced empty and never recomputed.
pub fn link_amounts(pair: &mut AmountPair, market: &Market, pool: &PoolState) {
    if let Some(disabled) = disabled_field(pool) {
        pair.set_field(disabled, String::new());
        if pair.last_edited == Some(disabled) {
            pair.last_edited = None;
        }
        return;
    }

    let Some(tick) = pool.tick else {
        return;
    };
    let Some((edited, value)) = pair.edited_value() else {
        return;
    };

    let price = match tick_to_price(tick, market.base.decimals, market.quote.decimals) {
        Ok(price) => price,
        Err(e) => {
            debug!("amount linking skipped: {}", e);
            return;
        }
    };

    match edited {
        EditedField::Amount => {
            let total = round_to_decimals(value * price, market.quote.decimals);
            pair.total = format_amount(total, market.quote.decimals);
        }
        EditedField::Total => {
            let amount = round_to_decimals(value / price, market.base.decimals);
            pair.amount = format_amount(amount, market.base.decimals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::amounts::parse_amount;
    use crate::domain::model::market::TokenInfo;

    fn market() -> Market {
        Market {
            name: "ICP/ckUSDC".to_string(),
            base: TokenInfo { symbol: "ICP".to_string(), decimals: 8 },
            quote: TokenInfo { symbol: "ckUSDC".to_string(), decimals: 8 },
            tick_spacing: 10,
        }
    }

    fn pool_at(tick: i32) -> PoolState {
        PoolState { tick: Some(tick), range_lower: -200_000, range_upper: 200_000, liquidity: 1e9 }
    }

    #[test]
    fn total_follows_edited_amount() {
        let market = market();
        let tick = 6932; // price just above 2.0
        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Amount, "50");

        link_amounts(&mut pair, &market, &pool_at(tick));

        let price = tick_to_price(tick, 8, 8).unwrap();
        let expected = round_to_decimals(50.0 * price, 8);
        assert_eq!(parse_amount(&pair.total).unwrap(), expected);
        // The edited field itself is untouched.
        assert_eq!(pair.amount, "50");
    }

    #[test]
    fn amount_total_derivation_round_trips() {
        let market = market();
        let pool = pool_at(12_000);

        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Amount, "3.14159265");
        link_amounts(&mut pair, &market, &pool);

        let derived_total = pair.total.clone();
        let mut back = AmountPair::new();
        back.record_edit(EditedField::Total, &derived_total);
        link_amounts(&mut back, &market, &pool);

        let original = 3.14159265_f64;
        let round_tripped = parse_amount(&back.amount).unwrap();
        assert!(
            (round_tripped - original).abs() < 1e-7,
            "round trip drifted: {} -> {}",
            original,
            round_tripped
        );
    }

    #[test]
    fn missing_tick_skips_linking() {
        let market = market();
        let pool = PoolState { tick: None, range_lower: -100, range_upper: 100, liquidity: 0.0 };

        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Total, "123.45");
        pair.amount = "9.9".to_string(); // previously derived value

        link_amounts(&mut pair, &market, &pool);
        assert_eq!(pair.amount, "9.9");
        assert_eq!(pair.total, "123.45");
    }

    #[test]
    fn one_sided_above_range_forces_amount_empty() {
        let market = market();
        let pool = PoolState { tick: Some(250_000), range_lower: -200_000, range_upper: 200_000, liquidity: 1e9 };

        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Amount, "50");
        link_amounts(&mut pair, &market, &pool);

        assert_eq!(pair.amount, "");
        assert_eq!(pair.last_edited, None);
    }

    #[test]
    fn one_sided_below_range_forces_total_empty() {
        let market = market();
        let pool = PoolState { tick: Some(-200_000), range_lower: -200_000, range_upper: 200_000, liquidity: 1e9 };

        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Total, "75");
        pair.record_edit(EditedField::Amount, "1.5");
        link_amounts(&mut pair, &market, &pool);

        assert_eq!(pair.total, "");
        // The enabled side keeps the user's value.
        assert_eq!(pair.amount, "1.5");
    }
}
