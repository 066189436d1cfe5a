use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::{Cohort, CustomerListQuery},
    state::AppState,
};

pub async fn list_customers(
    state: &AppState,
    query: CustomerListQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, per_page, offset) = query.pagination.normalize();
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let cohort = query.cohort.unwrap_or(Cohort::All);
    let today = Utc::now().date_naive();

    let mut items = state.store.customers.filter(|customer| {
        matches_query(customer, needle.as_deref()) && in_cohort(customer, cohort, today)
    });
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(page, per_page, total)),
    ))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = state.store.customers.get(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ok", customer, Some(Meta::empty())))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Customer name is required".into()));
    }
    let phone = payload.phone.trim();
    if phone.is_empty() {
        return Err(AppError::BadRequest("Customer phone is required".into()));
    }

    let now = Utc::now();
    let customer = state.store.customers.insert(Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: payload.email,
        phone: phone.to_string(),
        birth_date: payload.birth_date,
        preferences: payload.preferences.unwrap_or_default(),
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    });

    log_audit(
        &state.store,
        None,
        "customer_created",
        Some("customers"),
        Some(serde_json::json!({ "customer_id": customer.id })),
    );

    Ok(ApiResponse::success("Customer created", customer, Some(Meta::empty())))
}

pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    if state.store.customers.get(id).is_none() {
        return Err(AppError::NotFound);
    }
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("Customer name is required".into()));
    }
    if payload.phone.as_deref().is_some_and(|phone| phone.trim().is_empty()) {
        return Err(AppError::BadRequest("Customer phone is required".into()));
    }

    let customer = state
        .store
        .customers
        .update(id, |c| {
            if let Some(name) = payload.name {
                c.name = name.trim().to_string();
            }
            if let Some(email) = payload.email {
                c.email = Some(email);
            }
            if let Some(phone) = payload.phone {
                c.phone = phone.trim().to_string();
            }
            if let Some(birth_date) = payload.birth_date {
                c.birth_date = Some(birth_date);
            }
            if let Some(preferences) = payload.preferences {
                c.preferences = preferences;
            }
            if let Some(notes) = payload.notes {
                c.notes = Some(notes);
            }
            c.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "customer_updated",
        Some("customers"),
        Some(serde_json::json!({ "customer_id": customer.id })),
    );

    Ok(ApiResponse::success("Customer updated", customer, Some(Meta::empty())))
}

fn matches_query(customer: &Customer, needle: Option<&str>) -> bool {
    needle.is_none_or(|q| {
        customer.name.to_lowercase().contains(q)
            || customer.phone.contains(q)
            || customer
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(q))
    })
}

fn in_cohort(customer: &Customer, cohort: Cohort, today: NaiveDate) -> bool {
    match cohort {
        Cohort::All => true,
        Cohort::NewThisMonth => {
            let created = customer.created_at.date_naive();
            created.year() == today.year() && created.month() == today.month()
        }
        Cohort::BirthdaysThisMonth => customer
            .birth_date
            .is_some_and(|birth| birth.month() == today.month()),
        // Flagged either by age without contact or by an explicit note.
        Cohort::Risk => {
            (today - customer.created_at.date_naive()).num_days() > 90
                || customer
                    .notes
                    .as_deref()
                    .is_some_and(|notes| notes.contains("Sem contato há mais de 90 dias"))
        }
        Cohort::HighPotential => customer.preferences.len() >= 3,
        Cohort::Growth3Months => (today - customer.created_at.date_naive()).num_days() <= 90,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn sample(created_at: DateTime<Utc>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Maria Silva".into(),
            email: Some("maria@email.com".into()),
            phone: "(11) 99999-1234".into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 9, 15),
            preferences: vec!["Limpeza de Pele".into()],
            notes: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn query_matches_name_phone_and_email() {
        let customer = sample(Utc::now());
        assert!(matches_query(&customer, Some("maria")));
        assert!(matches_query(&customer, Some("99999")));
        assert!(matches_query(&customer, Some("maria@email")));
        assert!(!matches_query(&customer, Some("joana")));
        assert!(matches_query(&customer, None));
    }

    #[test]
    fn risk_cohort_checks_age_and_notes() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let old = sample(Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap());
        assert!(in_cohort(&old, Cohort::Risk, today));

        let mut flagged = sample(Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap());
        assert!(!in_cohort(&flagged, Cohort::Risk, today));
        flagged.notes = Some("Sem contato há mais de 90 dias".into());
        assert!(in_cohort(&flagged, Cohort::Risk, today));
    }

    #[test]
    fn birthday_cohort_uses_the_birth_month() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let customer = sample(Utc::now());
        assert!(in_cohort(&customer, Cohort::BirthdaysThisMonth, today));

        let january = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert!(!in_cohort(&customer, Cohort::BirthdaysThisMonth, january));
    }

    #[test]
    fn growth_cohort_is_the_last_quarter() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let recent = sample(Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
        let ancient = sample(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(in_cohort(&recent, Cohort::Growth3Months, today));
        assert!(!in_cohort(&ancient, Cohort::Growth3Months, today));
    }
}
