use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::permissions::{
        RoleGrants, RoleMatrix, StaffUserList, UpdateRoleMatrixRequest, UpdateUserRoleRequest,
    },
    error::AppResult,
    models::StaffUser,
    rbac::Role,
    response::ApiResponse,
    services::permission_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}/role", put(update_user_role))
        .route("/matrix", get(get_matrix))
        .route("/matrix/{role}", put(update_matrix))
}

#[utoipa::path(
    get,
    path = "/api/permissions/users",
    responses(
        (status = 200, description = "Active staff users", body = ApiResponse<StaffUserList>)
    ),
    tag = "permissions"
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StaffUserList>>> {
    let response = permission_service::list_users(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/permissions/users/{id}/role",
    params(
        ("id" = Uuid, Path, description = "Staff user ID")
    ),
    request_body = UpdateUserRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<StaffUser>),
        (status = 404, description = "User not found"),
    ),
    tag = "permissions"
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<ApiResponse<StaffUser>>> {
    let response = permission_service::update_user_role(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/permissions/matrix",
    responses(
        (status = 200, description = "Grant map per role", body = ApiResponse<RoleMatrix>)
    ),
    tag = "permissions"
)]
pub async fn get_matrix(State(state): State<AppState>) -> AppResult<Json<ApiResponse<RoleMatrix>>> {
    let response = permission_service::get_matrix(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/permissions/matrix/{role}",
    params(
        ("role" = String, Path, description = "admin, gestor, recepcao or profissional")
    ),
    request_body = UpdateRoleMatrixRequest,
    responses(
        (status = 200, description = "Matrix updated", body = ApiResponse<RoleGrants>),
        (status = 400, description = "Unknown permission key"),
    ),
    tag = "permissions"
)]
pub async fn update_matrix(
    State(state): State<AppState>,
    Path(role): Path<Role>,
    Json(payload): Json<UpdateRoleMatrixRequest>,
) -> AppResult<Json<ApiResponse<RoleGrants>>> {
    let response = permission_service::update_matrix(&state, role, payload).await?;
    Ok(Json(response))
}
