//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::PricingInput;

/// Request to estimate a tour price (live preview)
#[derive(Debug, Deserialize)]
pub struct EstimatePriceRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub tour_start_date: NaiveDate,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub occupancy_rate: Option<Decimal>,
}

impl From<EstimatePriceRequest> for PricingInput {
    fn from(req: EstimatePriceRequest) -> Self {
        PricingInput {
            base_price: req.base_price,
            tour_start_date: req.tour_start_date,
            occupancy_rate: req.occupancy_rate,
        }
    }
}

/// Request to format a discount reason token for display
#[derive(Debug, Deserialize)]
pub struct FormatReasonQuery {
    #[serde(default)]
    pub reason: Option<String>,
}
