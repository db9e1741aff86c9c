//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::format_discount_reason;
use super::models::{DiscountReason, PricingResult};

/// Pricing block returned for previews and tour details
#[derive(Debug, Clone, Serialize)]
pub struct PricingResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub savings: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percentage: Decimal,
    pub discount_reason: DiscountReason,
    pub discount_label: String,
    pub days_until: i64,
}

impl From<PricingResult> for PricingResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            base_price: result.base_price,
            current_price: result.current_price,
            savings: result.savings,
            discount_percentage: result.discount_percentage,
            discount_reason: result.discount_reason,
            discount_label: format_discount_reason(Some(result.discount_reason.as_token())),
            days_until: result.days_until,
        }
    }
}

/// Response for discount reason formatting
#[derive(Debug, Serialize)]
pub struct DiscountLabelResponse {
    pub label: String,
}

