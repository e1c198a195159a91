//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency all storefront prices are quoted in.
pub fn store_currency() -> &'static Currency {
    iso::USD
}

/// Convert a decimal amount into minor units (cents), rounding half away from zero.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
}

/// Format an amount in the store currency for display.
pub fn format_price(amount: Decimal) -> String {
    match to_minor_units(amount) {
        Some(minor_units) => format!("{}", Money::from_minor(minor_units, store_currency())),
        None => format!("{} {}", amount.round_dp(2), store_currency().iso_alpha_code),
    }
}
