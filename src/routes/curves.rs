use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::chart::{self, ChartSpec, SelectedPoint};
use crate::db::curves;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    isin1: String,
    isin2: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/curves/compare", get(api_compare))
        .route("/api/curves/select", post(api_select))
}

/// Fetch both yield curves and return the comparison chart. Empty results
/// render as a sparse chart; a database failure aborts the request.
async fn api_compare(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CompareQuery>,
) -> Result<Json<ChartSpec>, AppError> {
    let isin1 = q.isin1.trim();
    let isin2 = q.isin2.trim();

    let rows1 = curves::fetch_yield_curve(&state.pool, isin1).await?;
    let rows2 = curves::fetch_yield_curve(&state.pool, isin2).await?;

    tracing::debug!(
        "compare {isin1} ({} rows) vs {isin2} ({} rows)",
        rows1.len(),
        rows2.len()
    );

    let selection = state.selection().await;
    let spec = chart::comparison_chart(isin1, &rows1, isin2, &rows2, selection.as_ref());
    Ok(Json(spec))
}

/// Record a clicked chart point as the session selection; the highlight
/// marker appears on the next compare render.
async fn api_select(
    State(state): State<Arc<AppState>>,
    Json(point): Json<SelectedPoint>,
) -> Json<Value> {
    state.record_click(point).await;
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> (Arc<AppState>, Router) {
        let pool = crate::db::lazy_pool("postgres://reader:pw@localhost:5432/bonds", 1).unwrap();
        let state = AppState::new(pool);
        let app = crate::routes::api_router().with_state(Arc::clone(&state));
        (state, app)
    }

    #[tokio::test]
    async fn select_stores_the_clicked_point() {
        let (state, app) = test_app();

        let body = r#"{"x":"2030-06-15","y":3.6,"label":"US1234567890"}"#;
        let res = app
            .oneshot(
                Request::post("/api/curves/select")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let stored = state.selection().await.expect("selection stored");
        assert_eq!(stored.label, "US1234567890");
        assert_eq!(stored.y, 3.6);
    }

    #[tokio::test]
    async fn select_rejects_a_malformed_body() {
        let (state, app) = test_app();

        let res = app
            .oneshot(
                Request::post("/api/curves/select")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"x":"not-a-date"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(res.status().is_client_error());
        assert_eq!(state.selection().await, None);
    }

    #[tokio::test]
    async fn compare_requires_both_identifiers() {
        let (_state, app) = test_app();

        let res = app
            .oneshot(
                Request::get("/api/curves/compare?isin1=US1234567890")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
