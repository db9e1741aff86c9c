//! HTTP handlers for the pricing API.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{estimate, format_discount_reason};
use super::models::PricingInput;
use super::requests::{EstimatePriceRequest, FormatReasonQuery};
use super::responses::{DiscountLabelResponse, PricingResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/estimate", post(estimate_price))
        .route("/api/pricing/discount-label", get(discount_label))
}

/// Live, non-binding price preview
async fn estimate_price(
    State(state): State<AppState>,
    Json(req): Json<EstimatePriceRequest>,
) -> Result<Json<PricingResponse>> {
    let mut input = PricingInput::from(req);
    validate_input(&input)?;

    input
        .occupancy_rate
        .get_or_insert(state.config.preview_occupancy_rate);

    let result = estimate(&input);
    tracing::debug!(
        base_price = %input.base_price,
        start = %input.tour_start_date,
        current_price = %result.current_price,
        reason = %result.discount_reason,
        "Estimated tour price"
    );

    Ok(Json(result.into()))
}

async fn discount_label(Query(query): Query<FormatReasonQuery>) -> Json<DiscountLabelResponse> {
    Json(DiscountLabelResponse {
        label: format_discount_reason(query.reason.as_deref()),
    })
}

/// Reject inputs the estimator leaves undefined.
pub(crate) fn validate_input(input: &PricingInput) -> Result<()> {
    if input.base_price <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "base_price must be positive".to_string(),
        ));
    }

    if let Some(rate) = input.occupancy_rate {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(AppError::BadRequest(format!(
                "occupancy_rate must be within 0..=100, got {}",
                rate
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    fn app() -> Router {
        router().with_state(AppState::default())
    }

    async fn post_json(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::post("/api/pricing/estimate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_estimate_far_future_tour() {
        let start = (Utc::now() + Duration::days(90)).date_naive();
        let (status, body) = post_json(serde_json::json!({
            "base_price": "1000",
            "tour_start_date": start,
            "occupancy_rate": "25",
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["discount_reason"], "super_early_bird");
        assert_eq!(body["discount_label"], "Super Early Bird");
        assert_eq!(body["discount_percentage"], "25");
        assert_eq!(body["current_price"], "750.00");
        assert_eq!(body["savings"], "250.00");
    }

    #[tokio::test]
    async fn test_estimate_uses_configured_preview_rate() {
        let start = (Utc::now() + Duration::days(90)).date_naive();
        let (status, body) = post_json(serde_json::json!({
            "base_price": "1000",
            "tour_start_date": start,
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_price"], "750.00");
    }

    #[tokio::test]
    async fn test_estimate_rejects_non_positive_price() {
        let (status, body) = post_json(serde_json::json!({
            "base_price": "0",
            "tour_start_date": "2030-01-01",
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "bad_request");
    }

    #[tokio::test]
    async fn test_estimate_rejects_out_of_range_occupancy() {
        let (status, _) = post_json(serde_json::json!({
            "base_price": "100",
            "tour_start_date": "2030-01-01",
            "occupancy_rate": "101",
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_discount_label_endpoint() {
        let response = app()
            .oneshot(
                Request::get("/api/pricing/discount-label?reason=last_minute")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["label"], "Last Minute");

        let response = app()
            .oneshot(
                Request::get("/api/pricing/discount-label")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["label"], "Standard Pricing");
    }
}
