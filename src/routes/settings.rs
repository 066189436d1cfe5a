use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        agenda::ProfessionalList,
        settings::{
            ClosureList, ComboList, CreateClosureRequest, CreateComboRequest,
            CreatePaymentMethodRequest, CreateProcedureRequest, CreateProfessionalRequest,
            MatrixToggleRequest, OverrideList, PaymentMethodList, ProcedureList,
            UpdateClosureRequest, UpdateComboRequest, UpdatePaymentMethodRequest,
            UpdateProcedureRequest,
        },
    },
    error::AppResult,
    models::{BusinessHours, Closure, Combo, PaymentMethod, Procedure, Professional},
    response::ApiResponse,
    routes::params::ClosureQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payment-methods", get(list_payment_methods).post(create_payment_method))
        .route(
            "/payment-methods/{id}",
            put(update_payment_method).delete(delete_payment_method),
        )
        .route("/procedures", get(list_procedures).post(create_procedure))
        .route("/procedures/{id}", put(update_procedure).delete(delete_procedure))
        .route("/professionals", get(list_professionals).post(create_professional))
        .route("/overrides", get(list_overrides))
        .route("/matrix", put(toggle_matrix_cell))
        .route("/combos", get(list_combos).post(create_combo))
        .route("/combos/{id}", put(update_combo).delete(delete_combo))
        .route("/operation/business-hours", get(get_business_hours).put(update_business_hours))
        .route("/operation/closures", get(list_closures).post(create_closure))
        .route("/operation/closures/{id}", put(update_closure).delete(delete_closure))
}

#[utoipa::path(
    get,
    path = "/api/settings/payment-methods",
    responses(
        (status = 200, description = "List payment methods", body = ApiResponse<PaymentMethodList>)
    ),
    tag = "settings"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let response = catalog_service::list_payment_methods(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/settings/payment-methods",
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 200, description = "Payment method created", body = ApiResponse<PaymentMethod>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let response = catalog_service::create_payment_method(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/payment-methods/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    request_body = UpdatePaymentMethodRequest,
    responses(
        (status = 200, description = "Payment method updated", body = ApiResponse<PaymentMethod>),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "settings"
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let response = catalog_service::update_payment_method(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/settings/payment-methods/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Payment method deleted", body = ApiResponse<PaymentMethod>),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "settings"
)]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let response = catalog_service::delete_payment_method(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/procedures",
    responses(
        (status = 200, description = "List procedures", body = ApiResponse<ProcedureList>)
    ),
    tag = "settings"
)]
pub async fn list_procedures(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProcedureList>>> {
    let response = catalog_service::list_procedures(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/settings/procedures",
    request_body = CreateProcedureRequest,
    responses(
        (status = 200, description = "Procedure created", body = ApiResponse<Procedure>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn create_procedure(
    State(state): State<AppState>,
    Json(payload): Json<CreateProcedureRequest>,
) -> AppResult<Json<ApiResponse<Procedure>>> {
    let response = catalog_service::create_procedure(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/procedures/{id}",
    params(
        ("id" = Uuid, Path, description = "Procedure ID")
    ),
    request_body = UpdateProcedureRequest,
    responses(
        (status = 200, description = "Procedure updated", body = ApiResponse<Procedure>),
        (status = 404, description = "Procedure not found"),
    ),
    tag = "settings"
)]
pub async fn update_procedure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProcedureRequest>,
) -> AppResult<Json<ApiResponse<Procedure>>> {
    let response = catalog_service::update_procedure(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/settings/procedures/{id}",
    params(
        ("id" = Uuid, Path, description = "Procedure ID")
    ),
    responses(
        (status = 200, description = "Procedure deleted, matrix rows dropped with it", body = ApiResponse<Procedure>),
        (status = 404, description = "Procedure not found"),
    ),
    tag = "settings"
)]
pub async fn delete_procedure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Procedure>>> {
    let response = catalog_service::delete_procedure(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/professionals",
    responses(
        (status = 200, description = "List professionals, inactive included", body = ApiResponse<ProfessionalList>)
    ),
    tag = "settings"
)]
pub async fn list_professionals(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProfessionalList>>> {
    let response = catalog_service::list_professionals(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/settings/professionals",
    request_body = CreateProfessionalRequest,
    responses(
        (status = 200, description = "Professional created", body = ApiResponse<Professional>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn create_professional(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfessionalRequest>,
) -> AppResult<Json<ApiResponse<Professional>>> {
    let response = catalog_service::create_professional(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/overrides",
    responses(
        (status = 200, description = "Per-professional procedure overrides", body = ApiResponse<OverrideList>)
    ),
    tag = "settings"
)]
pub async fn list_overrides(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OverrideList>>> {
    let response = catalog_service::list_overrides(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/matrix",
    request_body = MatrixToggleRequest,
    responses(
        (status = 200, description = "Matrix updated", body = ApiResponse<OverrideList>),
        (status = 400, description = "Unknown professional or procedure"),
    ),
    tag = "settings"
)]
pub async fn toggle_matrix_cell(
    State(state): State<AppState>,
    Json(payload): Json<MatrixToggleRequest>,
) -> AppResult<Json<ApiResponse<OverrideList>>> {
    let response = catalog_service::toggle_matrix_cell(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/combos",
    responses(
        (status = 200, description = "List combos", body = ApiResponse<ComboList>)
    ),
    tag = "settings"
)]
pub async fn list_combos(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ComboList>>> {
    let response = catalog_service::list_combos(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/settings/combos",
    request_body = CreateComboRequest,
    responses(
        (status = 200, description = "Combo created", body = ApiResponse<Combo>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn create_combo(
    State(state): State<AppState>,
    Json(payload): Json<CreateComboRequest>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let response = catalog_service::create_combo(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/combos/{id}",
    params(
        ("id" = Uuid, Path, description = "Combo ID")
    ),
    request_body = UpdateComboRequest,
    responses(
        (status = 200, description = "Combo updated", body = ApiResponse<Combo>),
        (status = 404, description = "Combo not found"),
    ),
    tag = "settings"
)]
pub async fn update_combo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateComboRequest>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let response = catalog_service::update_combo(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/settings/combos/{id}",
    params(
        ("id" = Uuid, Path, description = "Combo ID")
    ),
    responses(
        (status = 200, description = "Combo deleted", body = ApiResponse<Combo>),
        (status = 404, description = "Combo not found"),
    ),
    tag = "settings"
)]
pub async fn delete_combo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let response = catalog_service::delete_combo(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/operation/business-hours",
    responses(
        (status = 200, description = "Business hours", body = ApiResponse<BusinessHours>)
    ),
    tag = "settings"
)]
pub async fn get_business_hours(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BusinessHours>>> {
    let response = catalog_service::get_business_hours(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/operation/business-hours",
    request_body = BusinessHours,
    responses(
        (status = 200, description = "Business hours updated", body = ApiResponse<BusinessHours>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn update_business_hours(
    State(state): State<AppState>,
    Json(payload): Json<BusinessHours>,
) -> AppResult<Json<ApiResponse<BusinessHours>>> {
    let response = catalog_service::update_business_hours(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/settings/operation/closures",
    params(
        ("scope" = Option<String>, Query, description = "global or professional"),
    ),
    responses(
        (status = 200, description = "List closures", body = ApiResponse<ClosureList>)
    ),
    tag = "settings"
)]
pub async fn list_closures(
    State(state): State<AppState>,
    Query(query): Query<ClosureQuery>,
) -> AppResult<Json<ApiResponse<ClosureList>>> {
    let response = catalog_service::list_closures(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/settings/operation/closures",
    request_body = CreateClosureRequest,
    responses(
        (status = 200, description = "Closure created", body = ApiResponse<Closure>),
        (status = 400, description = "Bad request"),
    ),
    tag = "settings"
)]
pub async fn create_closure(
    State(state): State<AppState>,
    Json(payload): Json<CreateClosureRequest>,
) -> AppResult<Json<ApiResponse<Closure>>> {
    let response = catalog_service::create_closure(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/settings/operation/closures/{id}",
    params(
        ("id" = Uuid, Path, description = "Closure ID")
    ),
    request_body = UpdateClosureRequest,
    responses(
        (status = 200, description = "Closure updated", body = ApiResponse<Closure>),
        (status = 404, description = "Closure not found"),
    ),
    tag = "settings"
)]
pub async fn update_closure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClosureRequest>,
) -> AppResult<Json<ApiResponse<Closure>>> {
    let response = catalog_service::update_closure(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/settings/operation/closures/{id}",
    params(
        ("id" = Uuid, Path, description = "Closure ID")
    ),
    responses(
        (status = 200, description = "Closure deleted", body = ApiResponse<Closure>),
        (status = 404, description = "Closure not found"),
    ),
    tag = "settings"
)]
pub async fn delete_closure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Closure>>> {
    let response = catalog_service::delete_closure(&state, id).await?;
    Ok(Json(response))
}
