use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    dto::agenda::{
        AppointmentList, BookedAppointment, CancelAppointmentRequest, CompleteAppointmentRequest,
        CompletedCheckout, CreateAppointmentRequest, DayView, ProfessionalList, RangeView,
        UpdateAppointmentRequest,
    },
    error::AppResult,
    models::Appointment,
    response::ApiResponse,
    routes::params::AppointmentListQuery,
    services::agenda_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/professionals", get(list_professionals))
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route("/appointments/{id}", get(get_appointment).put(update_appointment))
        .route("/appointments/{id}/confirm", post(confirm_appointment))
        .route("/appointments/{id}/cancel", post(cancel_appointment))
        .route("/appointments/{id}/complete", post(complete_appointment))
        .route("/day/{date}", get(day_view))
        .route("/week/{date}", get(week_view))
        .route("/month/{date}", get(month_view))
}

#[utoipa::path(
    get,
    path = "/api/agenda/professionals",
    responses(
        (status = 200, description = "Active professionals", body = ApiResponse<ProfessionalList>)
    ),
    tag = "agenda"
)]
pub async fn list_professionals(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProfessionalList>>> {
    let response = agenda_service::list_professionals(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/agenda/appointments",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("start_date" = Option<NaiveDate>, Query, description = "Inclusive lower bound on the civil date"),
        ("end_date" = Option<NaiveDate>, Query, description = "Inclusive upper bound on the civil date"),
        ("professional_id" = Option<Uuid>, Query, description = "Only this professional"),
        ("status" = Option<String>, Query, description = "to_confirm, confirmed, completed or canceled"),
    ),
    responses(
        (status = 200, description = "List appointments", body = ApiResponse<AppointmentList>)
    ),
    tag = "agenda"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let response = agenda_service::list_appointments(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/agenda/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Get appointment", body = ApiResponse<Appointment>),
        (status = 404, description = "Appointment not found"),
    ),
    tag = "agenda"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let response = agenda_service::get_appointment(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/agenda/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked; `conflict` flags a double booking", body = ApiResponse<BookedAppointment>),
        (status = 400, description = "Bad request"),
    ),
    tag = "agenda"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<Json<ApiResponse<BookedAppointment>>> {
    let response = agenda_service::create_appointment(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/agenda/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment rebooked", body = ApiResponse<BookedAppointment>),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment already closed"),
    ),
    tag = "agenda"
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> AppResult<Json<ApiResponse<BookedAppointment>>> {
    let response = agenda_service::update_appointment(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/agenda/appointments/{id}/confirm",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment confirmed", body = ApiResponse<Appointment>),
        (status = 409, description = "Not awaiting confirmation"),
    ),
    tag = "agenda"
)]
pub async fn confirm_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let response = agenda_service::confirm_appointment(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/agenda/appointments/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = CancelAppointmentRequest,
    responses(
        (status = 200, description = "Appointment canceled", body = ApiResponse<Appointment>),
        (status = 409, description = "Appointment already closed"),
    ),
    tag = "agenda"
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelAppointmentRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let response = agenda_service::cancel_appointment(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/agenda/appointments/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = CompleteAppointmentRequest,
    responses(
        (status = 200, description = "Checkout complete", body = ApiResponse<CompletedCheckout>),
        (status = 400, description = "Bad request"),
        (status = 409, description = "Appointment already closed"),
    ),
    tag = "agenda"
)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompleteAppointmentRequest>,
) -> AppResult<Json<ApiResponse<CompletedCheckout>>> {
    let response = agenda_service::complete_appointment(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/agenda/day/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Civil date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Day view with slot grid and per-professional columns", body = ApiResponse<DayView>)
    ),
    tag = "agenda"
)]
pub async fn day_view(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<ApiResponse<DayView>>> {
    let response = agenda_service::day_view(&state, date).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/agenda/week/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Any date inside the week (Monday start)")
    ),
    responses(
        (status = 200, description = "Week range view", body = ApiResponse<RangeView>)
    ),
    tag = "agenda"
)]
pub async fn week_view(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<ApiResponse<RangeView>>> {
    let response = agenda_service::week_view(&state, date).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/agenda/month/{date}",
    params(
        ("date" = NaiveDate, Path, description = "Any date inside the month")
    ),
    responses(
        (status = 200, description = "Month range view", body = ApiResponse<RangeView>)
    ),
    tag = "agenda"
)]
pub async fn month_view(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<ApiResponse<RangeView>>> {
    let response = agenda_service::month_view(&state, date).await?;
    Ok(Json(response))
}
