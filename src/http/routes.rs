use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::CACHE_CONTROL, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{AppError, AppState};
use crate::body::{calculate_bmi_checked, estimate_checked, BmiInput, BodyCompositionInput};
use crate::lookup;
use crate::tools::food_log::{self, LogFoodRequest};

/// Lookup responses stay fresh for a day
pub const SEARCH_CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

pub async fn nutrition_search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter is required".to_string()))?;

    let response = lookup::search_foods(state.source.as_ref(), query).await?;

    Ok(([(CACHE_CONTROL, SEARCH_CACHE_CONTROL)], Json(response)))
}

pub async fn body_composition_handler(
    payload: Result<Json<BodyCompositionInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    Ok(Json(estimate_checked(&input)?))
}

pub async fn bmi_handler(
    payload: Result<Json<BmiInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = json_body(payload)?;
    Ok(Json(calculate_bmi_checked(&input)?))
}

pub async fn log_food_handler(
    State(state): State<AppState>,
    payload: Result<Json<LogFoodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let data = food_log::build_entry(&request).map_err(AppError::BadRequest)?;

    let entry = food_log::store_entry(&state.database, &data).map_err(AppError::Internal)?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn day_log_handler(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    food_log::validate_user_id(&user_id).map_err(AppError::BadRequest)?;
    food_log::validate_date(&date).map_err(AppError::BadRequest)?;

    let day = food_log::get_day_log(&state.database, &user_id, &date).map_err(AppError::Internal)?;
    Ok(Json(day))
}

pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = food_log::delete_food_log_entry(&state.database, id).map_err(AppError::Internal)?;
    Ok(Json(result))
}

pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let tracker = state.status.lock().await;
    Json(tracker.get_status(&state.database))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db;
    use crate::http::build_router;
    use crate::lookup::testing::{apple, StaticFoodSource};
    use crate::lookup::FoodSource;
    use crate::tools::status::StatusTracker;

    fn state_with(source: StaticFoodSource) -> AppState {
        let source: Arc<dyn FoodSource> = Arc::new(source);
        AppState::new(
            source,
            db::open_in_memory().unwrap(),
            StatusTracker::new(PathBuf::from(":memory:")),
        )
    }

    fn state() -> AppState {
        state_with(StaticFoodSource::new(vec![apple(1, "Apple"), apple(2, "Apple pie")]))
    }

    async fn send(state: AppState, request: Request<Body>) -> Response {
        build_router(state).oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_results_with_cache_header() {
        let response = send(state(), get("/api/nutrition/search?query=apple")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CACHE_CONTROL].to_str().unwrap(),
            SEARCH_CACHE_CONTROL
        );

        let body = body_json(response).await;
        assert_eq!(body["query"], "apple");
        assert_eq!(body["totalHits"], 2);
        assert_eq!(body["results"][0]["fdcId"], 1);
        assert_eq!(body["results"][0]["calories"], 52.0);
        assert!(body["results"][0]["servingOptions"].as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        for uri in ["/api/nutrition/search", "/api/nutrition/search?query=%20%20"] {
            let response = send(state(), get(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({"error": "Query parameter is required"}));
        }
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_generic_500() {
        let response = send(
            state_with(StaticFoodSource::failing(503)),
            get("/api/nutrition/search?query=apple"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to fetch nutrition data"}));
    }

    #[tokio::test]
    async fn test_body_composition() {
        let response = send(
            state(),
            post(
                "/api/body-composition",
                json!({"sex": "male", "height": 70, "weight": 180, "waist": 34, "neck": 15}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let pct = body["bodyFatPercentage"].as_f64().unwrap();
        assert!((pct - 17.513).abs() < 0.01);
        assert_eq!(body["category"]["name"], "Average");
    }

    #[tokio::test]
    async fn test_body_composition_rejects_missing_hip() {
        let response = send(
            state(),
            post(
                "/api/body-composition",
                json!({"sex": "female", "height": 65, "weight": 150, "waist": 30, "neck": 13}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "hip is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = send(state(), post("/api/bmi", json!({"height": "tall"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bmi() {
        let response = send(
            state(),
            post("/api/bmi", json!({"unitSystem": "metric", "height": 180, "weight": 100})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["bmi"], 30.9);
        assert_eq!(body["categoryName"], "Obese");
        assert_eq!(body["eligible"], true);
    }

    #[tokio::test]
    async fn test_food_log_round_trip() {
        let state = state();
        let entry = json!({
            "userId": "u1",
            "date": "2026-10-19",
            "fdcId": 1,
            "foodName": "Apple",
            "per100g": {"calories": 52.0, "protein": 0.3, "carbs": 13.8, "fat": 0.2},
            "serving": {"label": "1 cup", "grams": 240.0},
            "quantity": 2.5
        });

        let response = send(state.clone(), post("/api/food-log", entry)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["nutrition"]["calories"], 312.0);
        assert_eq!(created["userId"], "u1");
        assert_eq!(created["servingGrams"], 240.0);
        let id = created["id"].as_i64().unwrap();

        let response = send(state.clone(), get("/api/food-log/u1/2026-10-19")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let day = body_json(response).await;
        assert_eq!(day["userId"], "u1");
        assert_eq!(day["entries"].as_array().unwrap().len(), 1);
        assert_eq!(day["totals"]["carbs"], 83.0);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/food-log/entries/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = send(state.clone(), delete).await;
        assert_eq!(body_json(response).await, json!({"success": true, "id": id}));
    }

    #[tokio::test]
    async fn test_food_log_validation() {
        let bad_date = send(state(), get("/api/food-log/u1/yesterday")).await;
        assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

        let negative = json!({
            "userId": "u1",
            "foodName": "Apple",
            "per100g": {"calories": 52.0, "protein": 0.3, "carbs": 13.8, "fat": 0.2},
            "serving": {"label": "1 cup", "grams": 240.0},
            "quantity": -1
        });
        let response = send(state(), post("/api/food-log", negative)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status() {
        let response = send(state(), get("/api/status")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["schemaCurrent"], true);
    }
}
