use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use outfitter_db::DbPool;
use serde::Serialize;
use sqlx::Row;
use tracing::warn;

/// Readiness of the database plus a snapshot of what the outfit queries can
/// work with. An empty catalog is reported but does not fail the check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogHealth {
    pub status: &'static str,
    pub categories: i64,
    pub brands: i64,
    pub active_items: i64,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(db_pool)
}

pub async fn health(State(pool): State<DbPool>) -> (StatusCode, Json<CatalogHealth>) {
    let checked_at = Utc::now().to_rfc3339();
    let counts = sqlx::query(
        "SELECT (SELECT COUNT(1) FROM category) AS categories, \
                (SELECT COUNT(1) FROM brand) AS brands, \
                (SELECT COUNT(1) FROM item WHERE status = 'active') AS active_items",
    )
    .fetch_one(&pool)
    .await
    .and_then(|row| -> Result<(i64, i64, i64), sqlx::Error> {
        Ok((row.try_get("categories")?, row.try_get("brands")?, row.try_get("active_items")?))
    });

    match counts {
        Ok((categories, brands, active_items)) => {
            let status = if categories == 0 { "empty" } else { "ready" };
            let payload = CatalogHealth { status, categories, brands, active_items, checked_at };
            (StatusCode::OK, Json(payload))
        }
        Err(error) => {
            warn!(event_name = "health.catalog.unreachable", %error, "health check failed");
            let payload = CatalogHealth {
                status: "unavailable",
                categories: 0,
                brands: 0,
                active_items: 0,
                checked_at,
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload))
        }
    }
}
