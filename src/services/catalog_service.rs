use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    billing::FeeSchedule,
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
    error::{AppError, AppResult},
    models::{
        BusinessHours, Closure, ClosureScope, Combo, ComboItem, DayKey, PaymentMethod,
        Procedure, ProcedureOverride, Professional,
    },
    response::{ApiResponse, Meta},
    routes::params::ClosureQuery,
    scheduling::dates,
    state::AppState,
};

// Payment methods

pub async fn list_payment_methods(
    state: &AppState,
) -> AppResult<ApiResponse<PaymentMethodList>> {
    let items = state.store.payment_methods.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Payment methods",
        PaymentMethodList { items },
        Some(Meta::total_only(total)),
    ))
}

pub async fn create_payment_method(
    state: &AppState,
    payload: CreatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let name = required_name(&payload.name, "Payment method name is required")?;
    if payload.fee_value < Decimal::ZERO {
        return Err(AppError::BadRequest("fee_value cannot be negative".into()));
    }

    let now = Utc::now();
    let method = state.store.payment_methods.insert(PaymentMethod {
        id: Uuid::new_v4(),
        name,
        fee: FeeSchedule { fee_type: payload.fee_type, fee_value: payload.fee_value },
        active: payload.active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    });

    log_audit(
        &state.store,
        None,
        "payment_method_created",
        Some("settings"),
        Some(serde_json::json!({ "payment_method_id": method.id })),
    );

    Ok(ApiResponse::success("Payment method created", method, Some(Meta::empty())))
}

pub async fn update_payment_method(
    state: &AppState,
    id: Uuid,
    payload: UpdatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    if state.store.payment_methods.get(id).is_none() {
        return Err(AppError::NotFound);
    }
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("Payment method name is required".into()));
    }
    if payload.fee_value.is_some_and(|value| value < Decimal::ZERO) {
        return Err(AppError::BadRequest("fee_value cannot be negative".into()));
    }

    let method = state
        .store
        .payment_methods
        .update(id, |m| {
            if let Some(name) = payload.name {
                m.name = name.trim().to_string();
            }
            if let Some(fee_type) = payload.fee_type {
                m.fee.fee_type = fee_type;
            }
            if let Some(fee_value) = payload.fee_value {
                m.fee.fee_value = fee_value;
            }
            if let Some(active) = payload.active {
                m.active = active;
            }
            m.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "payment_method_updated",
        Some("settings"),
        Some(serde_json::json!({ "payment_method_id": method.id })),
    );

    Ok(ApiResponse::success("Payment method updated", method, Some(Meta::empty())))
}

pub async fn delete_payment_method(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let method = state.store.payment_methods.remove(id).ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "payment_method_deleted",
        Some("settings"),
        Some(serde_json::json!({ "payment_method_id": method.id })),
    );

    Ok(ApiResponse::success("Payment method deleted", method, Some(Meta::empty())))
}

// Procedures

pub async fn list_procedures(state: &AppState) -> AppResult<ApiResponse<ProcedureList>> {
    let items = state.store.procedures.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Procedures",
        ProcedureList { items },
        Some(Meta::total_only(total)),
    ))
}

pub async fn create_procedure(
    state: &AppState,
    payload: CreateProcedureRequest,
) -> AppResult<ApiResponse<Procedure>> {
    let name = required_name(&payload.name, "Procedure name is required")?;
    validate_procedure_fields(
        Some(payload.duration_min),
        Some(payload.base_price),
        Some(payload.base_commission_pct),
    )?;

    let now = Utc::now();
    let procedure = state.store.procedures.insert(Procedure {
        id: Uuid::new_v4(),
        name,
        category: payload.category,
        duration_min: payload.duration_min,
        base_price: payload.base_price,
        base_commission_pct: payload.base_commission_pct,
        active: payload.active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    });

    log_audit(
        &state.store,
        None,
        "procedure_created",
        Some("settings"),
        Some(serde_json::json!({ "procedure_id": procedure.id })),
    );

    Ok(ApiResponse::success("Procedure created", procedure, Some(Meta::empty())))
}

pub async fn update_procedure(
    state: &AppState,
    id: Uuid,
    payload: UpdateProcedureRequest,
) -> AppResult<ApiResponse<Procedure>> {
    if state.store.procedures.get(id).is_none() {
        return Err(AppError::NotFound);
    }
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("Procedure name is required".into()));
    }
    validate_procedure_fields(payload.duration_min, payload.base_price, payload.base_commission_pct)?;

    let procedure = state
        .store
        .procedures
        .update(id, |p| {
            if let Some(name) = payload.name {
                p.name = name.trim().to_string();
            }
            if let Some(category) = payload.category {
                p.category = Some(category);
            }
            if let Some(duration_min) = payload.duration_min {
                p.duration_min = duration_min;
            }
            if let Some(base_price) = payload.base_price {
                p.base_price = base_price;
            }
            if let Some(pct) = payload.base_commission_pct {
                p.base_commission_pct = pct;
            }
            if let Some(active) = payload.active {
                p.active = active;
            }
            p.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "procedure_updated",
        Some("settings"),
        Some(serde_json::json!({ "procedure_id": procedure.id })),
    );

    Ok(ApiResponse::success("Procedure updated", procedure, Some(Meta::empty())))
}

pub async fn delete_procedure(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<Procedure>> {
    let procedure = state.store.procedures.remove(id).ok_or(AppError::NotFound)?;
    // Matrix rows for a deleted procedure are dead weight.
    state.store.procedure_overrides.retain(|o| o.procedure_id != id);

    log_audit(
        &state.store,
        None,
        "procedure_deleted",
        Some("settings"),
        Some(serde_json::json!({ "procedure_id": procedure.id })),
    );

    Ok(ApiResponse::success("Procedure deleted", procedure, Some(Meta::empty())))
}

// Professionals

pub async fn list_professionals(state: &AppState) -> AppResult<ApiResponse<ProfessionalList>> {
    let items = state.store.professionals.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Professionals",
        ProfessionalList { items },
        Some(Meta::total_only(total)),
    ))
}

pub async fn create_professional(
    state: &AppState,
    payload: CreateProfessionalRequest,
) -> AppResult<ApiResponse<Professional>> {
    let name = required_name(&payload.name, "Professional name is required")?;

    let professional = state.store.professionals.insert(Professional {
        id: Uuid::new_v4(),
        name,
        role: payload.role,
        color: payload.color,
        active: true,
    });

    log_audit(
        &state.store,
        None,
        "professional_created",
        Some("settings"),
        Some(serde_json::json!({ "professional_id": professional.id })),
    );

    Ok(ApiResponse::success("Professional created", professional, Some(Meta::empty())))
}

// Procedure matrix

pub async fn list_overrides(state: &AppState) -> AppResult<ApiResponse<OverrideList>> {
    let items = state.store.procedure_overrides.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Overrides",
        OverrideList { items },
        Some(Meta::total_only(total)),
    ))
}

pub async fn toggle_matrix_cell(
    state: &AppState,
    payload: MatrixToggleRequest,
) -> AppResult<ApiResponse<OverrideList>> {
    if state.store.professionals.get(payload.professional_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown professional {}",
            payload.professional_id
        )));
    }
    if state.store.procedures.get(payload.procedure_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown procedure {}",
            payload.procedure_id
        )));
    }

    let existing = state.store.procedure_overrides.find(|o| {
        o.professional_id == payload.professional_id && o.procedure_id == payload.procedure_id
    });

    match (payload.enabled, existing) {
        (true, Some(row)) => {
            state.store.procedure_overrides.update(row.id, |o| o.enabled = true);
        }
        (true, None) => {
            state.store.procedure_overrides.insert(ProcedureOverride {
                id: Uuid::new_v4(),
                professional_id: payload.professional_id,
                procedure_id: payload.procedure_id,
                price: None,
                commission_pct: None,
                duration_min: None,
                enabled: true,
            });
        }
        (false, Some(row)) => {
            state.store.procedure_overrides.remove(row.id);
        }
        (false, None) => {}
    }

    log_audit(
        &state.store,
        None,
        "matrix_toggled",
        Some("settings"),
        Some(serde_json::json!({
            "professional_id": payload.professional_id,
            "procedure_id": payload.procedure_id,
            "enabled": payload.enabled,
        })),
    );

    let items = state.store.procedure_overrides.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Matrix updated",
        OverrideList { items },
        Some(Meta::total_only(total)),
    ))
}

// Combos

pub async fn list_combos(state: &AppState) -> AppResult<ApiResponse<ComboList>> {
    let items = state.store.combos.all();
    let total = items.len() as i64;
    Ok(ApiResponse::success("Combos", ComboList { items }, Some(Meta::total_only(total))))
}

pub async fn create_combo(
    state: &AppState,
    payload: CreateComboRequest,
) -> AppResult<ApiResponse<Combo>> {
    let name = required_name(&payload.name, "Combo name is required")?;
    validate_combo_items(state, &payload.items)?;
    if payload.discount_value < Decimal::ZERO {
        return Err(AppError::BadRequest("discount_value cannot be negative".into()));
    }

    let now = Utc::now();
    let combo = state.store.combos.insert(Combo {
        id: Uuid::new_v4(),
        name,
        description: payload.description,
        items: payload.items,
        discount_type: payload.discount_type,
        discount_value: payload.discount_value,
        active: payload.active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    });

    log_audit(
        &state.store,
        None,
        "combo_created",
        Some("settings"),
        Some(serde_json::json!({ "combo_id": combo.id })),
    );

    Ok(ApiResponse::success("Combo created", combo, Some(Meta::empty())))
}

pub async fn update_combo(
    state: &AppState,
    id: Uuid,
    payload: UpdateComboRequest,
) -> AppResult<ApiResponse<Combo>> {
    if state.store.combos.get(id).is_none() {
        return Err(AppError::NotFound);
    }
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("Combo name is required".into()));
    }
    if let Some(items) = payload.items.as_deref() {
        validate_combo_items(state, items)?;
    }
    if payload.discount_value.is_some_and(|value| value < Decimal::ZERO) {
        return Err(AppError::BadRequest("discount_value cannot be negative".into()));
    }

    let combo = state
        .store
        .combos
        .update(id, |c| {
            if let Some(name) = payload.name {
                c.name = name.trim().to_string();
            }
            if let Some(description) = payload.description {
                c.description = Some(description);
            }
            if let Some(items) = payload.items {
                c.items = items;
            }
            if let Some(discount_type) = payload.discount_type {
                c.discount_type = discount_type;
            }
            if let Some(discount_value) = payload.discount_value {
                c.discount_value = discount_value;
            }
            if let Some(active) = payload.active {
                c.active = active;
            }
            c.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "combo_updated",
        Some("settings"),
        Some(serde_json::json!({ "combo_id": combo.id })),
    );

    Ok(ApiResponse::success("Combo updated", combo, Some(Meta::empty())))
}

pub async fn delete_combo(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Combo>> {
    let combo = state.store.combos.remove(id).ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "combo_deleted",
        Some("settings"),
        Some(serde_json::json!({ "combo_id": combo.id })),
    );

    Ok(ApiResponse::success("Combo deleted", combo, Some(Meta::empty())))
}

// Operation

pub async fn get_business_hours(state: &AppState) -> AppResult<ApiResponse<BusinessHours>> {
    Ok(ApiResponse::success("Business hours", state.store.business_hours(), Some(Meta::empty())))
}

pub async fn update_business_hours(
    state: &AppState,
    payload: BusinessHours,
) -> AppResult<ApiResponse<BusinessHours>> {
    validate_hours(&payload)?;
    let hours = state.store.set_business_hours(payload);

    log_audit(&state.store, None, "business_hours_updated", Some("settings"), None);

    Ok(ApiResponse::success("Business hours updated", hours, Some(Meta::empty())))
}

pub async fn list_closures(
    state: &AppState,
    query: ClosureQuery,
) -> AppResult<ApiResponse<ClosureList>> {
    let mut items = state
        .store
        .closures
        .filter(|c| query.scope.is_none_or(|scope| c.scope == scope));
    items.sort_by_key(|c| c.from);

    let total = items.len() as i64;
    Ok(ApiResponse::success("Closures", ClosureList { items }, Some(Meta::total_only(total))))
}

pub async fn create_closure(
    state: &AppState,
    payload: CreateClosureRequest,
) -> AppResult<ApiResponse<Closure>> {
    let title = required_name(&payload.title, "Closure title is required")?;
    if payload.from > payload.to {
        return Err(AppError::BadRequest("from must not be after to".into()));
    }

    let professional_id = match payload.scope {
        ClosureScope::Professional => {
            let id = payload.professional_id.ok_or_else(|| {
                AppError::BadRequest("professional_id is required for professional closures".into())
            })?;
            if state.store.professionals.get(id).is_none() {
                return Err(AppError::BadRequest(format!("Unknown professional {id}")));
            }
            Some(id)
        }
        ClosureScope::Global => None,
    };

    let closure = state.store.closures.insert(Closure {
        id: Uuid::new_v4(),
        scope: payload.scope,
        title,
        from: payload.from,
        to: payload.to,
        professional_id,
        note: payload.note,
    });

    log_audit(
        &state.store,
        None,
        "closure_created",
        Some("settings"),
        Some(serde_json::json!({ "closure_id": closure.id })),
    );

    Ok(ApiResponse::success("Closure created", closure, Some(Meta::empty())))
}

pub async fn update_closure(
    state: &AppState,
    id: Uuid,
    payload: UpdateClosureRequest,
) -> AppResult<ApiResponse<Closure>> {
    let existing = state.store.closures.get(id).ok_or(AppError::NotFound)?;
    if payload.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
        return Err(AppError::BadRequest("Closure title is required".into()));
    }

    let from = payload.from.unwrap_or(existing.from);
    let to = payload.to.unwrap_or(existing.to);
    if from > to {
        return Err(AppError::BadRequest("from must not be after to".into()));
    }

    let professional_id = match (existing.scope, payload.professional_id) {
        (ClosureScope::Professional, Some(pid)) => {
            if state.store.professionals.get(pid).is_none() {
                return Err(AppError::BadRequest(format!("Unknown professional {pid}")));
            }
            Some(pid)
        }
        (ClosureScope::Professional, None) => existing.professional_id,
        // Global closures never point at a professional.
        (ClosureScope::Global, _) => None,
    };

    let closure = state
        .store
        .closures
        .update(id, |c| {
            if let Some(title) = payload.title {
                c.title = title.trim().to_string();
            }
            c.from = from;
            c.to = to;
            c.professional_id = professional_id;
            if let Some(note) = payload.note {
                c.note = Some(note);
            }
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "closure_updated",
        Some("settings"),
        Some(serde_json::json!({ "closure_id": closure.id })),
    );

    Ok(ApiResponse::success("Closure updated", closure, Some(Meta::empty())))
}

pub async fn delete_closure(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Closure>> {
    let closure = state.store.closures.remove(id).ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "closure_deleted",
        Some("settings"),
        Some(serde_json::json!({ "closure_id": closure.id })),
    );

    Ok(ApiResponse::success("Closure deleted", closure, Some(Meta::empty())))
}

fn required_name(raw: &str, message: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(message.into()));
    }
    Ok(trimmed.to_string())
}

fn validate_procedure_fields(
    duration_min: Option<i32>,
    base_price: Option<Decimal>,
    commission_pct: Option<Decimal>,
) -> AppResult<()> {
    if duration_min.is_some_and(|min| min <= 0) {
        return Err(AppError::BadRequest("duration_min must be positive".into()));
    }
    if base_price.is_some_and(|price| price < Decimal::ZERO) {
        return Err(AppError::BadRequest("base_price cannot be negative".into()));
    }
    if commission_pct
        .is_some_and(|pct| pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED)
    {
        return Err(AppError::BadRequest("base_commission_pct must be between 0 and 100".into()));
    }
    Ok(())
}

fn validate_combo_items(state: &AppState, items: &[ComboItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::BadRequest("A combo needs at least one procedure".into()));
    }
    for item in items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest("Combo item quantity must be at least 1".into()));
        }
        if state.store.procedures.get(item.procedure_id).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown procedure {}",
                item.procedure_id
            )));
        }
    }
    Ok(())
}

fn validate_hours(hours: &BusinessHours) -> AppResult<()> {
    if hours.timezone != dates::STUDIO_TZ {
        return Err(AppError::BadRequest(format!(
            "timezone must be {}",
            dates::STUDIO_TZ
        )));
    }
    if hours.default_slot_minutes <= 0 {
        return Err(AppError::BadRequest("default_slot_minutes must be positive".into()));
    }

    const WEEK: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];
    let covers_week = hours.days.len() == 7
        && WEEK
            .iter()
            .all(|day| hours.days.iter().filter(|d| d.day == *day).count() == 1);
    if !covers_week {
        return Err(AppError::BadRequest(
            "Business hours must cover each weekday exactly once".into(),
        ));
    }

    for schedule in &hours.days {
        for interval in &schedule.intervals {
            if interval.start >= interval.end {
                return Err(AppError::BadRequest(format!(
                    "Interval {} ends before it starts",
                    interval.start.format("%H:%M")
                )));
            }
        }
    }
    Ok(())
}
