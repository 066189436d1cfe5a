use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::reports::RevenueReport,
    error::AppResult,
    response::ApiResponse,
    routes::params::ReportRangeQuery,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/revenue", get(revenue))
}

#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    params(
        ("start_date" = NaiveDate, Query, description = "Inclusive range start"),
        ("end_date" = NaiveDate, Query, description = "Inclusive range end"),
    ),
    responses(
        (status = 200, description = "Revenue, commission and fees over the range", body = ApiResponse<RevenueReport>),
        (status = 400, description = "Bad request"),
    ),
    tag = "reports"
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<ReportRangeQuery>,
) -> AppResult<Json<ApiResponse<RevenueReport>>> {
    let response = report_service::revenue_report(&state, query).await?;
    Ok(Json(response))
}
