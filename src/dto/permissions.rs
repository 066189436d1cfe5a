use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::StaffUser;
use crate::rbac::Role;

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffUserList {
    pub items: Vec<StaffUser>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleGrants {
    pub role: Role,
    pub grants: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleMatrix {
    pub roles: Vec<RoleGrants>,
}

/// Partial overlay for one role; keys not present keep their current value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleMatrixRequest {
    pub grants: BTreeMap<String, bool>,
}
