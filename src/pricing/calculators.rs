//! Core pricing calculation functions.
//!
//! Pure functions for the tour price estimator - no I/O, no shared state.
//! Safe to call on every keystroke of a price preview.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{DiscountReason, PricingInput, PricingResult};

/// Occupancy rate assumed when the caller has no live capacity data.
pub const PREVIEW_OCCUPANCY_RATE: Decimal = dec!(25);

/// Weight of the schedule-driven discount in the blend.
pub const TIME_WEIGHT: Decimal = dec!(0.6);

/// Weight of the demand-driven discount in the blend.
pub const OCCUPANCY_WEIGHT: Decimal = dec!(0.4);

/// Fraction of the base price a tour is never sold below.
pub const PRICE_FLOOR_RATIO: Decimal = dec!(0.7);

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tourprice::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Whole days from `now` until the start of `start_date` (00:00 UTC), rounded up.
///
/// A tour starting later today yields 0, one starting tomorrow yields 1.
/// Past dates give negative values.
pub fn days_until(start_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    let millis = (start - now).num_milliseconds();

    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

/// Blend the schedule and demand discounts (60/40). Not rounded.
pub fn blend_discount(time_discount: Decimal, occupancy_discount: Decimal) -> Decimal {
    time_discount * TIME_WEIGHT + occupancy_discount * OCCUPANCY_WEIGHT
}

/// Apply a discount percentage to a base price, never going below the floor.
///
/// The floor is rounded up to the cent so that rounding can never push the
/// returned price under `base_price * 0.7`.
pub fn apply_discount(base_price: Decimal, discount_percentage: Decimal) -> Decimal {
    let discounted = base_price * (Decimal::ONE - discount_percentage / Decimal::ONE_HUNDRED);
    let minimum = (base_price * PRICE_FLOOR_RATIO)
        .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity);

    let mut price = round_money(discounted, 2).max(minimum);
    price.rescale(2);
    price
}

/// Estimate the current price of a tour as of `now`.
///
/// Total over any input: a non-positive base price gives a degenerate result
/// under the same formula rather than an error. Occupancy rates outside
/// `[0, 100]` are clamped.
pub fn estimate_at(input: &PricingInput, now: DateTime<Utc>) -> PricingResult {
    let days_until = days_until(input.tour_start_date, now);
    let discount_reason = DiscountReason::for_days_until(days_until);

    let occupancy_discount = input
        .occupancy_rate
        .unwrap_or(PREVIEW_OCCUPANCY_RATE)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    let blended = blend_discount(discount_reason.discount(), occupancy_discount);
    let current_price = apply_discount(input.base_price, blended);

    PricingResult {
        base_price: input.base_price,
        current_price,
        savings: input.base_price - current_price,
        discount_percentage: round_money(blended, 2).normalize(),
        discount_reason,
        days_until,
    }
}

/// Estimate the current price of a tour as of now.
pub fn estimate(input: &PricingInput) -> PricingResult {
    estimate_at(input, Utc::now())
}

/// Title-case a discount reason token for display.
///
/// Splits on underscores and whitespace and upper-cases each word's first
/// letter. Missing or blank reasons display as "Standard Pricing".
pub fn format_discount_reason(reason: Option<&str>) -> String {
    let words: Vec<String> = reason
        .unwrap_or_default()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Standard Pricing".to_string()
    } else {
        words.join(" ")
    }
}
