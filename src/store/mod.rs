//! In-memory tables backing the API. Rows keep insertion order and every
//! read hands out clones, so handlers never hold a lock across an await.

mod seed;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveTime;
use uuid::Uuid;

use crate::audit::AuditEntry;
use crate::models::{
    Appointment, BusinessHours, Closure, Combo, Customer, DayInterval, DayKey, DaySchedule,
    PaymentMethod, Procedure, ProcedureOverride, Professional, StaffUser,
};
use crate::rbac::{self, Role};
use crate::scheduling::dates::STUDIO_TZ;

pub type SharedStore = Arc<Store>;

/// Anything stored in a [`Table`].
pub trait Entity {
    fn id(&self) -> Uuid;
}

macro_rules! entity_impl {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

entity_impl!(
    Appointment,
    AuditEntry,
    Closure,
    Combo,
    Customer,
    PaymentMethod,
    Procedure,
    ProcedureOverride,
    Professional,
    StaffUser,
);

/// One table of rows behind an `RwLock`. Mutation goes through closures so
/// callers never see the guard.
pub struct Table<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Entity + Clone> Table<T> {
    fn new() -> Self {
        Self { rows: RwLock::new(Vec::new()) }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.read().iter().find(|row| row.id() == id).cloned()
    }

    /// Appends and returns the stored row, mirroring `INSERT .. RETURNING`.
    pub fn insert(&self, row: T) -> T {
        self.write().push(row.clone());
        row
    }

    /// Applies `apply` to the row with `id` and returns the updated clone.
    pub fn update<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.write();
        let row = rows.iter_mut().find(|row| row.id() == id)?;
        apply(row);
        Some(row.clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<T> {
        let mut rows = self.write();
        let position = rows.iter().position(|row| row.id() == id)?;
        Some(rows.remove(position))
    }

    pub fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.read().iter().find(|row| predicate(row)).cloned()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.read().iter().filter(|row| predicate(row)).cloned().collect()
    }

    pub fn retain<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool,
    {
        self.write().retain(|row| predicate(row));
    }
}

pub struct Store {
    pub professionals: Table<Professional>,
    pub appointments: Table<Appointment>,
    pub customers: Table<Customer>,
    pub procedures: Table<Procedure>,
    pub procedure_overrides: Table<ProcedureOverride>,
    pub payment_methods: Table<PaymentMethod>,
    pub combos: Table<Combo>,
    pub closures: Table<Closure>,
    pub staff_users: Table<StaffUser>,
    pub audit_log: Table<AuditEntry>,
    business_hours: RwLock<BusinessHours>,
    role_matrix: RwLock<HashMap<Role, BTreeMap<String, bool>>>,
}

impl Store {
    pub fn new() -> Self {
        let mut matrix = HashMap::new();
        for role in Role::ALL {
            matrix.insert(role, rbac::role_grants(role));
        }

        Self {
            professionals: Table::new(),
            appointments: Table::new(),
            customers: Table::new(),
            procedures: Table::new(),
            procedure_overrides: Table::new(),
            payment_methods: Table::new(),
            combos: Table::new(),
            closures: Table::new(),
            staff_users: Table::new(),
            audit_log: Table::new(),
            business_hours: RwLock::new(default_business_hours()),
            role_matrix: RwLock::new(matrix),
        }
    }

    /// Loads the demo fixtures. Safe to call more than once; a non-empty
    /// store is left alone.
    pub fn seed_demo(&self) {
        seed::populate(self);
    }

    pub fn business_hours(&self) -> BusinessHours {
        self.business_hours
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_business_hours(&self, hours: BusinessHours) -> BusinessHours {
        let mut current = self.business_hours.write().unwrap_or_else(PoisonError::into_inner);
        *current = hours;
        current.clone()
    }

    pub fn grants_for(&self, role: Role) -> BTreeMap<String, bool> {
        self.role_matrix
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&role)
            .cloned()
            .unwrap_or_else(|| rbac::role_grants(role))
    }

    /// Overlays `updates` on the role's current grants, keeping untouched
    /// keys as they are.
    pub fn merge_grants(&self, role: Role, updates: BTreeMap<String, bool>) -> BTreeMap<String, bool> {
        let mut matrix = self.role_matrix.write().unwrap_or_else(PoisonError::into_inner);
        let grants = matrix.entry(role).or_insert_with(|| rbac::role_grants(role));
        grants.extend(updates);
        grants.clone()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Mon–Fri 09:00–18:00 in 30 minute slots, weekend closed.
pub(crate) fn default_business_hours() -> BusinessHours {
    let open = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    let close = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
    let days = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ]
    .into_iter()
    .map(|day| {
        let enabled = !matches!(day, DayKey::Sat | DayKey::Sun);
        DaySchedule {
            day,
            enabled,
            intervals: if enabled {
                vec![DayInterval { start: open, end: close }]
            } else {
                Vec::new()
            },
        }
    })
    .collect();

    BusinessHours {
        timezone: STUDIO_TZ.to_string(),
        default_slot_minutes: 30,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::Utc;

    #[test]
    fn table_crud_round_trip() {
        let store = Store::new();
        let now = Utc::now();
        let inserted = store.customers.insert(Customer {
            id: Uuid::new_v4(),
            name: "Teste".to_string(),
            email: None,
            phone: "(11) 90000-0000".to_string(),
            birth_date: None,
            preferences: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(store.customers.len(), 1);
        assert_eq!(store.customers.get(inserted.id).map(|c| c.name), Some("Teste".to_string()));

        let updated = store
            .customers
            .update(inserted.id, |c| c.name = "Renomeada".to_string())
            .map(|c| c.name);
        assert_eq!(updated, Some("Renomeada".to_string()));

        assert!(store.customers.remove(inserted.id).is_some());
        assert!(store.customers.is_empty());
    }

    #[test]
    fn seed_fills_every_table_once() {
        let store = Store::new();
        store.seed_demo();
        store.seed_demo();

        assert_eq!(store.professionals.len(), 3);
        assert_eq!(store.appointments.len(), 6);
        assert_eq!(store.customers.len(), 6);
        assert_eq!(store.procedures.len(), 8);
        assert_eq!(store.payment_methods.len(), 4);
        assert_eq!(store.procedure_overrides.len(), 2);
        assert_eq!(store.closures.len(), 3);
        assert_eq!(store.staff_users.len(), 4);
    }

    #[test]
    fn seed_carries_the_known_overlap() {
        let store = Store::new();
        store.seed_demo();

        let appointments = store.appointments.all();
        let overlapping = crate::scheduling::detect_overlaps(&appointments);
        assert_eq!(overlapping.len(), 2);

        let completed = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn default_hours_open_weekdays_only() {
        let store = Store::new();
        let hours = store.business_hours();
        assert_eq!(hours.default_slot_minutes, 30);
        assert_eq!(hours.days.len(), 7);

        let saturday = hours.days.iter().find(|d| d.day == DayKey::Sat);
        assert!(saturday.is_some_and(|d| !d.enabled && d.intervals.is_empty()));
        let monday = hours.days.iter().find(|d| d.day == DayKey::Mon);
        assert!(monday.is_some_and(|d| d.enabled && d.intervals.len() == 1));
    }

    #[test]
    fn merge_grants_overlays_without_clearing() {
        let store = Store::new();
        let before = store.grants_for(Role::Recepcao);
        assert_eq!(before.get("agenda.delete"), Some(&false));

        let mut updates = BTreeMap::new();
        updates.insert("agenda.delete".to_string(), true);
        let after = store.merge_grants(Role::Recepcao, updates);

        assert_eq!(after.get("agenda.delete"), Some(&true));
        assert_eq!(after.get("agenda.read"), Some(&true));
        assert_eq!(after.len(), before.len());
    }
}
