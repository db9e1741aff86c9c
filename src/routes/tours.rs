//! Tour listing route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::models::{
    days_until_label, Availability, TourCategory, TourListing, TourStatus, Urgency,
};
use crate::pricing::calculators::estimate_at;
use crate::pricing::responses::PricingResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tours", get(list).post(create))
        .route("/api/tours/:id", get(detail).delete(remove))
        .route("/api/tours/:id/capacity", put(update_capacity))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache/invalidate", post(invalidate_cache))
}

/// Listing pushed by the booking backend
#[derive(Debug, Deserialize)]
pub struct CreateTourRequest {
    #[serde(default)]
    pub tour_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: TourStatus,
    #[serde(default)]
    pub categories: Vec<TourCategory>,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub capacity_total: u32,
    #[serde(default)]
    pub booked: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCapacityRequest {
    pub booked: u32,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CapacityResponse {
    pub total: u32,
    pub booked: u32,
    pub available: u32,
    /// e.g. "75%"
    pub occupancy_rate: String,
}

#[derive(Debug, Serialize)]
pub struct UrgencyResponse {
    pub kind: Urgency,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub status: Availability,
    pub message: String,
}

/// Tour detail view: listing plus live pricing and capacity
#[derive(Debug, Serialize)]
pub struct TourDetailResponse {
    pub tour_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TourStatus,
    pub categories: Vec<TourCategory>,
    pub pricing: PricingResponse,
    pub capacity: CapacityResponse,
    pub urgency: Option<UrgencyResponse>,
    pub availability: AvailabilityResponse,
    pub days_until_label: String,
}

impl TourDetailResponse {
    pub fn build(tour: &TourListing, now: DateTime<Utc>) -> Self {
        let capacity = tour.capacity();
        let pricing = estimate_at(&tour.pricing_input(), now);
        let urgency = Urgency::evaluate(capacity.occupancy_rate, pricing.days_until);
        let availability = Availability::from_occupancy(capacity.occupancy_rate);

        Self {
            tour_id: tour.tour_id,
            title: tour.title.clone(),
            description: tour.description.clone(),
            duration: tour.duration.clone(),
            start_date: tour.start_date,
            end_date: tour.end_date,
            status: tour.status,
            categories: tour.categories.clone(),
            days_until_label: days_until_label(pricing.days_until),
            pricing: pricing.into(),
            capacity: CapacityResponse {
                occupancy_rate: capacity.occupancy_label(),
                total: capacity.total,
                booked: capacity.booked,
                available: capacity.available,
            },
            urgency: urgency.map(|kind| UrgencyResponse {
                kind,
                message: kind.message().to_string(),
            }),
            availability: AvailabilityResponse {
                status: availability,
                message: availability.message().to_string(),
            },
        }
    }
}

/// Register or replace a tour listing
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<TourDetailResponse>)> {
    if req.base_price <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "base_price must be positive".to_string(),
        ));
    }
    if req.end_date < req.start_date {
        return Err(AppError::BadRequest(
            "end_date must not be before start_date".to_string(),
        ));
    }

    let tour = TourListing {
        tour_id: req.tour_id.unwrap_or_else(Uuid::new_v4),
        title: req.title,
        description: req.description,
        duration: req.duration,
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status,
        categories: req.categories,
        base_price: req.base_price,
        capacity_total: req.capacity_total,
        booked: req.booked,
    };

    let tour = state.cache.put_tour(tour).await;
    Ok((
        StatusCode::CREATED,
        Json(TourDetailResponse::build(&tour, Utc::now())),
    ))
}

async fn list(State(state): State<AppState>) -> Json<Vec<TourDetailResponse>> {
    let now = Utc::now();
    let tours = state
        .cache
        .all_tours()
        .iter()
        .map(|tour| TourDetailResponse::build(tour, now))
        .collect();
    Json(tours)
}

async fn detail(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<Json<TourDetailResponse>> {
    let tour = state
        .cache
        .get_tour(tour_id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(Json(TourDetailResponse::build(&tour, Utc::now())))
}

/// Update seat counts; pricing picks up the new occupancy on the next read
async fn update_capacity(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
    Json(req): Json<UpdateCapacityRequest>,
) -> Result<Json<TourDetailResponse>> {
    let current = state
        .cache
        .get_tour(tour_id)
        .await
        .ok_or(AppError::NotFound)?;

    let mut tour = (*current).clone();
    tour.booked = req.booked;
    if let Some(total) = req.total {
        tour.capacity_total = total;
    }

    let tour = state.cache.put_tour(tour).await;
    Ok(Json(TourDetailResponse::build(&tour, Utc::now())))
}

async fn remove(State(state): State<AppState>, Path(tour_id): Path<Uuid>) -> Result<StatusCode> {
    if state.cache.invalidate_tour(tour_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        response::Response,
    };
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn create_body(tour_id: Uuid, days_ahead: i64, total: u32, booked: u32) -> serde_json::Value {
        let start = (Utc::now() + Duration::days(days_ahead)).date_naive();
        serde_json::json!({
            "tour_id": tour_id,
            "title": "Everest View Trek",
            "description": "Short trek with views of Everest",
            "duration": "5 days",
            "start_date": start,
            "end_date": start + Duration::days(5),
            "categories": [{
                "category_id": Uuid::new_v4(),
                "category_name": "Trekking",
            }],
            "base_price": "1000",
            "capacity_total": total,
            "booked": booked,
        })
    }

    #[test]
    fn test_detail_view_same_day_full_tour() {
        let now = Utc::now();
        let tour = TourListing {
            tour_id: Uuid::new_v4(),
            title: "Pokhara Lakeside Walk".to_string(),
            description: String::new(),
            duration: "1 day".to_string(),
            start_date: now.date_naive(),
            end_date: now.date_naive(),
            status: TourStatus::Active,
            categories: vec![],
            base_price: dec!(1000),
            capacity_total: 10,
            booked: 10,
        };

        let view = TourDetailResponse::build(&tour, now);
        // 40 * 0.6 + 100 * 0.4 = 64, floored at 70% of base
        assert_eq!(view.pricing.current_price, dec!(700));
        assert_eq!(view.pricing.discount_percentage, dec!(64));
        assert_eq!(view.capacity.available, 0);
        assert_eq!(view.capacity.occupancy_rate, "100%");
        assert_eq!(view.urgency.map(|u| u.kind), Some(Urgency::AlmostSoldOut));
        assert_eq!(view.availability.status, Availability::AlmostFull);
        assert_eq!(view.days_until_label, "Today!");
    }

    #[tokio::test]
    async fn test_create_then_fetch_tour() {
        let app = router().with_state(AppState::default());
        let tour_id = Uuid::new_v4();

        let response = send(
            &app,
            json_request("POST", "/api/tours", create_body(tour_id, 90, 20, 5)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            &app,
            Request::get(format!("/api/tours/{}", tour_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        // 25 * 0.6 + 25 * 0.4 = 25
        assert_eq!(body["pricing"]["current_price"], "750.00");
        assert_eq!(body["pricing"]["discount_reason"], "super_early_bird");
        assert_eq!(body["capacity"]["occupancy_rate"], "25%");
        assert_eq!(body["capacity"]["available"], 15);
        assert_eq!(body["availability"]["message"], "Good Availability");
        assert!(body["urgency"].is_null());
        assert_eq!(body["categories"][0]["category_name"], "Trekking");
    }

    #[tokio::test]
    async fn test_capacity_update_reprices_tour() {
        let app = router().with_state(AppState::default());
        let tour_id = Uuid::new_v4();

        send(
            &app,
            json_request("POST", "/api/tours", create_body(tour_id, 90, 20, 5)),
        )
        .await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/tours/{}/capacity", tour_id),
                serde_json::json!({ "booked": 15 }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        // 25 * 0.6 + 75 * 0.4 = 45 -> 550, floored to 700
        assert_eq!(body["pricing"]["discount_percentage"], "45");
        assert_eq!(body["pricing"]["current_price"], "700.00");
        assert_eq!(body["availability"]["message"], "Filling Fast!");
    }

    #[tokio::test]
    async fn test_unknown_tour_is_not_found() {
        let app = router().with_state(AppState::default());
        let uri = format!("/api/tours/{}", Uuid::new_v4());

        let response = send(&app, Request::get(uri.as_str()).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Request::delete(uri.as_str()).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_listing() {
        let app = router().with_state(AppState::default());

        let mut body = create_body(Uuid::new_v4(), 30, 10, 0);
        body["base_price"] = serde_json::json!("-5");
        let response = send(&app, json_request("POST", "/api/tours", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut body = create_body(Uuid::new_v4(), 30, 10, 0);
        body["end_date"] = serde_json::json!("2000-01-01");
        let response = send(&app, json_request("POST", "/api/tours", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_and_remove_tours() {
        let state = AppState::default();
        let app = router().with_state(state.clone());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        send(&app, json_request("POST", "/api/tours", create_body(second, 40, 10, 0))).await;
        send(&app, json_request("POST", "/api/tours", create_body(first, 10, 10, 0))).await;

        let response = send(&app, Request::get("/api/tours").body(Body::empty()).unwrap()).await;
        let body = json_body(response).await;
        let tours = body.as_array().unwrap();
        assert_eq!(tours.len(), 2);
        assert_eq!(tours[0]["tour_id"], first.to_string());
        assert_eq!(tours[1]["tour_id"], second.to_string());

        let response = send(
            &app,
            Request::delete(format!("/api/tours/{}", first))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.cache.stats().await.tours_size, 1);
    }
}
