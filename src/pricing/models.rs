//! Domain models for the tour pricing estimator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Time-based discount tier a tour falls into.
///
/// Serialized as a snake_case token (`super_early_bird`, ...); use
/// [`DiscountReason::label`] or [`format_discount_reason`](super::calculators::format_discount_reason)
/// for the display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountReason {
    SuperEarlyBird,
    EarlyBird,
    AdvanceBooking,
    LastWeek,
    LastMinute,
    SameDay,
}

impl DiscountReason {
    /// Pick the tier for a number of days until the tour starts.
    ///
    /// Rows are checked top to bottom, first match wins.
    pub fn for_days_until(days_until: i64) -> Self {
        if days_until > 60 {
            DiscountReason::SuperEarlyBird
        } else if days_until > 30 {
            DiscountReason::EarlyBird
        } else if days_until > 14 {
            DiscountReason::AdvanceBooking
        } else if days_until > 7 {
            DiscountReason::LastWeek
        } else if days_until >= 1 {
            DiscountReason::LastMinute
        } else {
            DiscountReason::SameDay
        }
    }

    /// Schedule-driven discount percentage for this tier.
    pub fn discount(self) -> Decimal {
        match self {
            DiscountReason::SuperEarlyBird => dec!(25),
            DiscountReason::EarlyBird => dec!(20),
            DiscountReason::AdvanceBooking => dec!(10),
            DiscountReason::LastWeek => dec!(5),
            DiscountReason::LastMinute => dec!(30),
            DiscountReason::SameDay => dec!(40),
        }
    }

    /// Machine-readable token, identical to the serialized form.
    pub fn as_token(self) -> &'static str {
        match self {
            DiscountReason::SuperEarlyBird => "super_early_bird",
            DiscountReason::EarlyBird => "early_bird",
            DiscountReason::AdvanceBooking => "advance_booking",
            DiscountReason::LastWeek => "last_week",
            DiscountReason::LastMinute => "last_minute",
            DiscountReason::SameDay => "same_day",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiscountReason::SuperEarlyBird => "Super Early Bird",
            DiscountReason::EarlyBird => "Early Bird",
            DiscountReason::AdvanceBooking => "Advance Booking",
            DiscountReason::LastWeek => "Last Week",
            DiscountReason::LastMinute => "Last Minute",
            DiscountReason::SameDay => "Same Day",
        }
    }
}

impl std::fmt::Display for DiscountReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs to a price estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    /// List price per person, expected to be positive.
    pub base_price: Decimal,
    pub tour_start_date: NaiveDate,
    /// Booked/total capacity in percent. `None` falls back to the preview rate.
    pub occupancy_rate: Option<Decimal>,
}

impl PricingInput {
    pub fn new(base_price: Decimal, tour_start_date: NaiveDate) -> Self {
        Self {
            base_price,
            tour_start_date,
            occupancy_rate: None,
        }
    }

    pub fn with_occupancy_rate(mut self, occupancy_rate: Decimal) -> Self {
        self.occupancy_rate = Some(occupancy_rate);
        self
    }
}

/// Result of a price estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub base_price: Decimal,
    /// Never below 70% of the base price.
    pub current_price: Decimal,
    /// `base_price - current_price`
    pub savings: Decimal,
    /// Blended discount, rounded to 2 places.
    pub discount_percentage: Decimal,
    pub discount_reason: DiscountReason,
    pub days_until: i64,
}
