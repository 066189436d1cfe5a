use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::permissions::{
        RoleGrants, RoleMatrix, StaffUserList, UpdateRoleMatrixRequest, UpdateUserRoleRequest,
    },
    error::{AppError, AppResult},
    models::StaffUser,
    rbac::{permission_key, Resource, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<StaffUserList>> {
    let items = state.store.staff_users.filter(|u| u.active);
    let total = items.len() as i64;
    Ok(ApiResponse::success("Users", StaffUserList { items }, Some(Meta::total_only(total))))
}

pub async fn update_user_role(
    state: &AppState,
    id: Uuid,
    payload: UpdateUserRoleRequest,
) -> AppResult<ApiResponse<StaffUser>> {
    if state.store.staff_users.get(id).is_none() {
        return Err(AppError::NotFound);
    }

    let user = state
        .store
        .staff_users
        .update(id, |u| u.role = payload.role)
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "user_role_updated",
        Some("permissions"),
        Some(serde_json::json!({ "user_id": user.id, "role": user.role })),
    );

    Ok(ApiResponse::success("Role updated", user, Some(Meta::empty())))
}

pub async fn get_matrix(state: &AppState) -> AppResult<ApiResponse<RoleMatrix>> {
    let roles = Role::ALL
        .into_iter()
        .map(|role| RoleGrants { role, grants: state.store.grants_for(role) })
        .collect();
    Ok(ApiResponse::success("Role matrix", RoleMatrix { roles }, Some(Meta::empty())))
}

/// Partial overlay: keys absent from the request keep their current value.
pub async fn update_matrix(
    state: &AppState,
    role: Role,
    payload: UpdateRoleMatrixRequest,
) -> AppResult<ApiResponse<RoleGrants>> {
    for key in payload.grants.keys() {
        if !is_declared_key(key) {
            return Err(AppError::BadRequest(format!("Unknown permission key {key}")));
        }
    }

    let grants = state.store.merge_grants(role, payload.grants);

    log_audit(
        &state.store,
        None,
        "role_matrix_updated",
        Some("permissions"),
        Some(serde_json::json!({ "role": role })),
    );

    Ok(ApiResponse::success("Matrix updated", RoleGrants { role, grants }, Some(Meta::empty())))
}

fn is_declared_key(key: &str) -> bool {
    Resource::ALL.iter().any(|resource| {
        resource
            .actions()
            .iter()
            .any(|&action| permission_key(*resource, action) == key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_keys_follow_the_resource_action_sets() {
        assert!(is_declared_key("agenda.read"));
        assert!(is_declared_key("pos.finalize"));
        assert!(is_declared_key("permissions.configure"));
        assert!(!is_declared_key("reports.confirm"));
        assert!(!is_declared_key("agenda"));
        assert!(!is_declared_key("stock.read"));
    }
}
