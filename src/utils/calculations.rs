use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::models::sku::SkuComponent;

/// Amazon referral fee as a fraction of the selling price.
pub const DEFAULT_AMAZON_FEE_RATE: Decimal = Decimal::from_parts(98, 0, 0, false, 3);

/// Largest unit cost or price accepted from user input.
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Round half-up to cents. Callers only pass non-negative amounts, where
/// away-from-zero and half-up agree.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Extended cost = quantity * cost per unit, rounded to cents.
/// Saturates instead of overflowing.
pub fn extended_cost(quantity: u32, unit_cost: Decimal) -> Decimal {
    round2(Decimal::from(quantity).saturating_mul(unit_cost))
}

pub fn sum_money<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// Sum of extended costs for all components
pub fn component_cost(components: &[SkuComponent]) -> Decimal {
    sum_money(components.iter().map(|c| c.extended_cost))
}

pub fn amazon_fee(selling_price: Decimal, rate: Decimal) -> Decimal {
    round2(selling_price.saturating_mul(rate))
}

/// Clamp a money amount to `[0, MAX_MONEY]`.
pub fn clamp_money(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_MONEY)
}

pub fn with_recalculated_extended_cost(component: &SkuComponent) -> SkuComponent {
    SkuComponent {
        extended_cost: extended_cost(component.quantity, component.cost),
        ..component.clone()
    }
}

/// Recompute all extended costs and return new lines
pub fn recalculate_component_costs(components: &[SkuComponent]) -> Vec<SkuComponent> {
    components.iter().map(with_recalculated_extended_cost).collect()
}

/// Parse a quantity typed by a user. Anything that is not a positive whole
/// number becomes 1.
pub fn coerce_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Parse a money amount typed by a user. Unparseable or negative input
/// becomes 0; anything above `MAX_MONEY` is capped.
pub fn coerce_money(raw: &str) -> Decimal {
    match Decimal::from_str(raw.trim()) {
        Ok(value) => clamp_money(value),
        Err(_) => Decimal::ZERO,
    }
}

pub fn format_currency(value: Decimal) -> String {
    format!("{:.2}", value)
}
