//! Role → permission matrix. Purely descriptive: the API never gates a
//! request on it, the dashboard only uses it to decide what to render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Gestor,
    Recepcao,
    Profissional,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Gestor, Role::Recepcao, Role::Profissional];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Agenda,
    Customers,
    Procedures,
    Combos,
    Reports,
    Pos,
    Settings,
    Permissions,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Agenda,
        Resource::Customers,
        Resource::Procedures,
        Resource::Combos,
        Resource::Reports,
        Resource::Pos,
        Resource::Settings,
        Resource::Permissions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Agenda => "agenda",
            Resource::Customers => "customers",
            Resource::Procedures => "procedures",
            Resource::Combos => "combos",
            Resource::Reports => "reports",
            Resource::Pos => "pos",
            Resource::Settings => "settings",
            Resource::Permissions => "permissions",
        }
    }

    /// Actions that exist for this resource. The matrix is not a full cross
    /// product: there is no `reports.confirm` or `agenda.finalize`.
    pub fn actions(self) -> &'static [Action] {
        use Action::*;
        match self {
            Resource::Agenda => &[Read, Create, Update, Delete, Confirm, Cancel],
            Resource::Customers => &[Read, Create, Update, Delete, Export],
            Resource::Procedures | Resource::Combos => {
                &[Read, Create, Update, Delete, Configure]
            }
            Resource::Reports => &[Read, Export],
            Resource::Pos => &[Read, Finalize],
            Resource::Settings | Resource::Permissions => &[Read, Configure],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Export,
    Confirm,
    Finalize,
    Cancel,
    Configure,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Export,
        Action::Confirm,
        Action::Finalize,
        Action::Cancel,
        Action::Configure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Confirm => "confirm",
            Action::Finalize => "finalize",
            Action::Cancel => "cancel",
            Action::Configure => "configure",
        }
    }
}

/// `"resource.action"`, the key shape the matrix endpoints speak.
pub fn permission_key(resource: Resource, action: Action) -> String {
    format!("{}.{}", resource.as_str(), action.as_str())
}

/// Default grant for a role. Mirrors the shipped matrix: admins get
/// everything, gestores everything except reconfiguring permissions,
/// reception handles day-to-day booking without deletes or configuration,
/// professionals see their agenda and close out their own services.
pub fn can(role: Role, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    match role {
        Role::Admin => true,
        Role::Gestor => !(resource == Permissions && action == Configure),
        Role::Recepcao => match (resource, action) {
            (Agenda, Read | Create | Update | Confirm | Cancel) => true,
            (Customers, Read | Create | Update) => true,
            (Procedures, Read) => true,
            (Combos, Read) => true,
            (Pos, Read | Finalize) => true,
            _ => false,
        },
        Role::Profissional => match (resource, action) {
            (Agenda, Read) => true,
            (Customers, Read) => true,
            (Procedures, Read) => true,
            (Combos, Read) => true,
            (Pos, Read | Finalize) => true,
            _ => false,
        },
    }
}

/// Default grant map for one role, one entry per declared key.
pub fn role_grants(role: Role) -> BTreeMap<String, bool> {
    let mut grants = BTreeMap::new();
    for resource in Resource::ALL {
        for &action in resource.actions() {
            grants.insert(permission_key(resource, action), can(role, resource, action));
        }
    }
    grants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_every_permission() {
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(can(Role::Admin, resource, action));
            }
        }
    }

    #[test]
    fn gestor_is_admin_minus_permission_configure() {
        assert!(!can(Role::Gestor, Resource::Permissions, Action::Configure));
        assert!(can(Role::Gestor, Resource::Permissions, Action::Read));
        assert!(can(Role::Gestor, Resource::Settings, Action::Configure));
        assert!(can(Role::Gestor, Resource::Agenda, Action::Delete));
    }

    #[test]
    fn recepcao_runs_the_desk_without_deletes() {
        assert!(can(Role::Recepcao, Resource::Agenda, Action::Create));
        assert!(can(Role::Recepcao, Resource::Agenda, Action::Cancel));
        assert!(can(Role::Recepcao, Resource::Pos, Action::Finalize));
        assert!(!can(Role::Recepcao, Resource::Agenda, Action::Delete));
        assert!(!can(Role::Recepcao, Resource::Customers, Action::Delete));
        assert!(!can(Role::Recepcao, Resource::Reports, Action::Read));
        assert!(!can(Role::Recepcao, Resource::Settings, Action::Read));
    }

    #[test]
    fn profissional_reads_and_finalizes_only() {
        assert!(can(Role::Profissional, Resource::Agenda, Action::Read));
        assert!(can(Role::Profissional, Resource::Pos, Action::Finalize));
        assert!(!can(Role::Profissional, Resource::Agenda, Action::Create));
        assert!(!can(Role::Profissional, Resource::Customers, Action::Update));
    }

    #[test]
    fn role_grants_cover_every_declared_key() {
        let grants = role_grants(Role::Recepcao);
        let declared: usize = Resource::ALL.iter().map(|r| r.actions().len()).sum();
        assert_eq!(grants.len(), declared);
        assert_eq!(declared, 29);
        assert_eq!(grants.get("agenda.read"), Some(&true));
        assert_eq!(grants.get("permissions.configure"), Some(&false));
        assert!(!grants.contains_key("reports.confirm"));
    }
}
