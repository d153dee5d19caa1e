//! Per-task cost arithmetic and the single money-rounding policy.

use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_PER_HOUR: u32 = 3600;

/// Computes the labour cost of a second count at an hourly rate.
///
/// The result carries full decimal precision; round it with
/// [`round_money`] only when it crosses a display or export boundary.
#[must_use]
pub fn task_cost(active_seconds: u64, hourly_rate: Decimal) -> Decimal {
    hourly_rate * Decimal::from(active_seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Rounds a monetary amount to two decimals, midpoint away from zero.
///
/// Applied uniformly across every reporting surface, and applied once:
/// aggregation accumulates at full precision and rounds at the boundary.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a monetary amount with exactly two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}
