//! Tour listing models and the presentation rules of the tour detail view

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::calculators::round_money;
use crate::pricing::models::PricingInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    #[default]
    Active,
    Inactive,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourCategory {
    pub category_id: Uuid,
    pub category_name: String,
}

/// Tour listing mirrored from the booking backend
#[derive(Debug, Clone, PartialEq)]
pub struct TourListing {
    pub tour_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TourStatus,
    pub categories: Vec<TourCategory>,
    pub base_price: Decimal,
    pub capacity_total: u32,
    pub booked: u32,
}

impl TourListing {
    pub fn capacity(&self) -> Capacity {
        Capacity::new(self.capacity_total, self.booked)
    }

    /// Pricing input using the live occupancy of this listing
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput::new(self.base_price, self.start_date)
            .with_occupancy_rate(self.capacity().occupancy_rate)
    }
}

/// Seat counts of a tour
#[derive(Debug, Clone, PartialEq)]
pub struct Capacity {
    pub total: u32,
    pub booked: u32,
    pub available: u32,
    /// Percentage of seats booked, 2 places
    pub occupancy_rate: Decimal,
}

impl Capacity {
    pub fn new(total: u32, booked: u32) -> Self {
        let occupancy_rate = if total == 0 {
            Decimal::ZERO
        } else {
            round_money(
                Decimal::from(booked) * Decimal::ONE_HUNDRED / Decimal::from(total),
                2,
            )
        };

        Self {
            total,
            booked,
            available: total.saturating_sub(booked),
            occupancy_rate,
        }
    }

    /// Occupancy rendered as a percentage string, e.g. `"75%"`
    pub fn occupancy_label(&self) -> String {
        format!("{}%", self.occupancy_rate.normalize())
    }
}

/// Banner shown above a tour when it needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    AlmostSoldOut,
    LastMinute,
    StartingSoon,
}

impl Urgency {
    /// Occupancy takes precedence over proximity of the start date.
    pub fn evaluate(occupancy_rate: Decimal, days_until: i64) -> Option<Self> {
        if occupancy_rate >= dec!(90) {
            Some(Urgency::AlmostSoldOut)
        } else if (1..=3).contains(&days_until) {
            Some(Urgency::LastMinute)
        } else if (1..=7).contains(&days_until) {
            Some(Urgency::StartingSoon)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Urgency::AlmostSoldOut => "Almost Sold Out!",
            Urgency::LastMinute => "Last Minute Booking Available",
            Urgency::StartingSoon => "Tour Starting Soon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    AlmostFull,
    FillingFast,
    Good,
}

impl Availability {
    pub fn from_occupancy(occupancy_rate: Decimal) -> Self {
        if occupancy_rate >= dec!(90) {
            Availability::AlmostFull
        } else if occupancy_rate >= dec!(70) {
            Availability::FillingFast
        } else {
            Availability::Good
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Availability::AlmostFull => "Almost Full!",
            Availability::FillingFast => "Filling Fast!",
            Availability::Good => "Good Availability",
        }
    }
}

/// Human label for the number of days until a tour starts
pub fn days_until_label(days_until: i64) -> String {
    match days_until {
        d if d > 0 => format!("{} days", d),
        0 => "Today!".to_string(),
        _ => "Past".to_string(),
    }
}
