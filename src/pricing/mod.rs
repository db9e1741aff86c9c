//! Pricing engine module for tour listings.
//!
//! Provides the dynamic price estimator (time tier + occupancy blend with a
//! 70% floor) and the HTTP endpoints that serve live price previews.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{estimate, estimate_at, format_discount_reason, round_money};
pub use models::{DiscountReason, PricingInput, PricingResult};
pub use routes::router;
