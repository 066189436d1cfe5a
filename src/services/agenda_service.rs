use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    billing::{self, DiscountSpec, LineItem},
    dto::agenda::{
        AppointmentList, BookedAppointment, BookingItem, CancelAppointmentRequest,
        CompleteAppointmentRequest, CompletedCheckout, CreateAppointmentRequest, DayColumn,
        DayView, ProfessionalList, RangeView, UpdateAppointmentRequest,
    },
    error::{AppError, AppResult},
    models::{
        Appointment, AppointmentStatus, BusinessHours, Cancellation, Customer, CustomerRef,
        DayKey, PaymentInfo, PaymentStatus, ProcedureLine,
    },
    response::{ApiResponse, Meta},
    routes::params::AppointmentListQuery,
    scheduling::{dates, detect_overlaps, SlotIndex},
    state::AppState,
    store::Store,
};

pub async fn list_professionals(state: &AppState) -> AppResult<ApiResponse<ProfessionalList>> {
    let items = state.store.professionals.filter(|p| p.active);
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Professionals",
        ProfessionalList { items },
        Some(Meta::total_only(total)),
    ))
}

pub async fn list_appointments(
    state: &AppState,
    query: AppointmentListQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let (page, per_page, offset) = query.pagination.normalize();

    let mut items = state.store.appointments.filter(|a| {
        let date = a.starts_at.date_naive();
        query.start_date.is_none_or(|start| date >= start)
            && query.end_date.is_none_or(|end| date <= end)
            && query.professional_id.is_none_or(|id| a.professional_id == id)
            && query.status.is_none_or(|status| a.status == status)
    });
    items.sort_by_key(|a| a.starts_at);

    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        AppointmentList { items },
        Some(Meta::new(page, per_page, total)),
    ))
}

pub async fn get_appointment(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    let appointment = state.store.appointments.get(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ok", appointment, Some(Meta::empty())))
}

pub async fn create_appointment(
    state: &AppState,
    payload: CreateAppointmentRequest,
) -> AppResult<ApiResponse<BookedAppointment>> {
    let start = parse_slot(&payload.start_time, "start_time")?;
    let end = parse_slot(&payload.end_time, "end_time")?;
    if end <= start {
        return Err(AppError::BadRequest("end_time must be after start_time".into()));
    }
    if state.store.professionals.get(payload.professional_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown professional {}",
            payload.professional_id
        )));
    }

    let resolved = resolve_items(&state.store, payload.professional_id, &payload.items)?;
    let customer = resolve_customer(state, &payload)?;

    let starts_at = dates::studio_instant(payload.date, start);
    let ends_at = dates::studio_instant(payload.date, end);
    let conflict = has_conflict(&state.store, payload.professional_id, starts_at, ends_at, None);

    let now = Utc::now();
    let appointment = state.store.appointments.insert(Appointment {
        id: Uuid::new_v4(),
        customer,
        professional_id: payload.professional_id,
        starts_at,
        ends_at,
        status: AppointmentStatus::ToConfirm,
        cancellation: None,
        procedures: booking_lines(&resolved),
        payment: None,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    });

    if conflict {
        tracing::warn!(appointment_id = %appointment.id, "double booking created");
    }
    log_audit(
        &state.store,
        None,
        "appointment_created",
        Some("agenda"),
        Some(serde_json::json!({ "appointment_id": appointment.id, "conflict": conflict })),
    );

    Ok(ApiResponse::success(
        "Appointment booked",
        BookedAppointment { appointment, conflict },
        Some(Meta::empty()),
    ))
}

pub async fn update_appointment(
    state: &AppState,
    id: Uuid,
    payload: UpdateAppointmentRequest,
) -> AppResult<ApiResponse<BookedAppointment>> {
    let existing = state.store.appointments.get(id).ok_or(AppError::NotFound)?;
    if existing.status.is_terminal() {
        return Err(AppError::Conflict("Closed appointments cannot be edited".into()));
    }

    let professional_id = payload.professional_id.unwrap_or(existing.professional_id);
    if state.store.professionals.get(professional_id).is_none() {
        return Err(AppError::BadRequest(format!("Unknown professional {professional_id}")));
    }

    let date = payload.date.unwrap_or_else(|| existing.starts_at.date_naive());
    let start = match payload.start_time.as_deref() {
        Some(raw) => parse_slot(raw, "start_time")?,
        None => existing.starts_at.time(),
    };
    let end = match payload.end_time.as_deref() {
        Some(raw) => parse_slot(raw, "end_time")?,
        None => existing.ends_at.time(),
    };
    if end <= start {
        return Err(AppError::BadRequest("end_time must be after start_time".into()));
    }

    let procedures = match payload.items.as_deref() {
        Some(items) => booking_lines(&resolve_items(&state.store, professional_id, items)?),
        None => existing.procedures.clone(),
    };

    let starts_at = dates::studio_instant(date, start);
    let ends_at = dates::studio_instant(date, end);
    let conflict = has_conflict(&state.store, professional_id, starts_at, ends_at, Some(id));

    let appointment = state
        .store
        .appointments
        .update(id, |a| {
            a.professional_id = professional_id;
            a.starts_at = starts_at;
            a.ends_at = ends_at;
            a.procedures = procedures;
            if let Some(notes) = payload.notes {
                a.notes = Some(notes);
            }
            a.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "appointment_updated",
        Some("agenda"),
        Some(serde_json::json!({ "appointment_id": appointment.id, "conflict": conflict })),
    );

    Ok(ApiResponse::success(
        "Appointment updated",
        BookedAppointment { appointment, conflict },
        Some(Meta::empty()),
    ))
}

pub async fn confirm_appointment(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    let existing = state.store.appointments.get(id).ok_or(AppError::NotFound)?;
    if existing.status != AppointmentStatus::ToConfirm {
        return Err(AppError::Conflict(
            "Only appointments awaiting confirmation can be confirmed".into(),
        ));
    }

    let appointment = state
        .store
        .appointments
        .update(id, |a| {
            a.status = AppointmentStatus::Confirmed;
            a.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "appointment_confirmed",
        Some("agenda"),
        Some(serde_json::json!({ "appointment_id": appointment.id })),
    );

    Ok(ApiResponse::success("Appointment confirmed", appointment, Some(Meta::empty())))
}

pub async fn cancel_appointment(
    state: &AppState,
    id: Uuid,
    payload: CancelAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let existing = state.store.appointments.get(id).ok_or(AppError::NotFound)?;
    if existing.status.is_terminal() {
        return Err(AppError::Conflict("Appointment already closed".into()));
    }

    let appointment = state
        .store
        .appointments
        .update(id, |a| {
            a.status = AppointmentStatus::Canceled;
            a.cancellation = Some(Cancellation { reason: payload.reason, notes: payload.notes });
            a.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "appointment_canceled",
        Some("agenda"),
        Some(serde_json::json!({ "appointment_id": appointment.id, "reason": payload.reason })),
    );

    Ok(ApiResponse::success("Appointment canceled", appointment, Some(Meta::empty())))
}

/// The POS checkout. Prices come from the booked snapshot unless the request
/// re-edits the items; the commission default comes from the config.
pub async fn complete_appointment(
    state: &AppState,
    id: Uuid,
    payload: CompleteAppointmentRequest,
) -> AppResult<ApiResponse<CompletedCheckout>> {
    let existing = state.store.appointments.get(id).ok_or(AppError::NotFound)?;
    match existing.status {
        AppointmentStatus::Completed => {
            return Err(AppError::Conflict("Appointment already completed".into()));
        }
        AppointmentStatus::Canceled => {
            return Err(AppError::Conflict("Canceled appointments cannot be completed".into()));
        }
        AppointmentStatus::ToConfirm | AppointmentStatus::Confirmed => {}
    }

    let line_items: Vec<LineItem> = match payload.items.as_deref() {
        Some(items) => resolve_items(&state.store, existing.professional_id, items)?
            .into_iter()
            .map(|r| LineItem {
                id: Uuid::new_v4(),
                procedure_id: r.procedure_id,
                professional_id: r.professional_id,
                name: r.name,
                price: r.price,
                qty: r.qty,
            })
            .collect(),
        None => existing
            .procedures
            .iter()
            .map(|line| LineItem {
                id: Uuid::new_v4(),
                procedure_id: line.id,
                professional_id: existing.professional_id,
                name: line.name.clone(),
                price: line.price,
                qty: 1,
            })
            .collect(),
    };

    let discount = DiscountSpec { pct: payload.discount_pct, value: payload.discount_value };
    let commission_pct = payload
        .commission_pct
        .unwrap_or(state.config.default_commission_pct);
    let method = payload
        .payment_method_id
        .and_then(|method_id| state.store.payment_methods.get(method_id));

    let totals = billing::compute_totals(
        &line_items,
        &discount,
        payload.manual_total,
        commission_pct,
        method.as_ref().map(|m| &m.fee),
    );
    if totals.discount_amount > totals.subtotal {
        return Err(AppError::BadRequest("Discount cannot exceed the subtotal".into()));
    }

    let edited_lines = payload.items.is_some().then(|| checkout_lines(&line_items));
    let paid_at = Utc::now().with_timezone(&dates::studio_offset());
    let payment = PaymentInfo {
        method_id: method.as_ref().map(|m| m.id),
        method_name: method.as_ref().map(|m| m.name.clone()),
        status: PaymentStatus::Paid,
        amount: Some(totals.effective_total),
        paid_at: Some(paid_at),
    };

    let appointment = state
        .store
        .appointments
        .update(id, |a| {
            a.status = AppointmentStatus::Completed;
            if let Some(lines) = edited_lines {
                a.procedures = lines;
            }
            a.payment = Some(payment);
            a.updated_at = Utc::now();
        })
        .ok_or(AppError::NotFound)?;

    log_audit(
        &state.store,
        None,
        "checkout",
        Some("agenda"),
        Some(serde_json::json!({
            "appointment_id": appointment.id,
            "total": totals.effective_total,
            "payment_method": appointment.payment.as_ref().and_then(|p| p.method_name.clone()),
        })),
    );

    Ok(ApiResponse::success(
        "Checkout complete",
        CompletedCheckout { appointment, totals },
        Some(Meta::empty()),
    ))
}

pub async fn day_view(state: &AppState, date: NaiveDate) -> AppResult<ApiResponse<DayView>> {
    let hours = state.store.business_hours();
    let rows = slot_rows(&hours, date);

    let day_appointments = state
        .store
        .appointments
        .filter(|a| a.starts_at.date_naive() == date && a.status != AppointmentStatus::Canceled);

    let index = SlotIndex::build(&day_appointments, date);
    let total = index.len() as i64;

    let columns = state
        .store
        .professionals
        .filter(|p| p.active)
        .into_iter()
        .map(|professional| {
            let mut appointments = BTreeMap::new();
            if let Some(slots) = index.for_professional(professional.id) {
                for (slot, bucket) in slots {
                    appointments.insert(
                        slot.format("%H:%M").to_string(),
                        bucket.iter().map(|a| (*a).clone()).collect(),
                    );
                }
            }
            DayColumn { professional, appointments }
        })
        .collect();

    let mut conflicts: Vec<Uuid> = detect_overlaps(&day_appointments).into_iter().collect();
    conflicts.sort();

    let view = DayView {
        date,
        slots: rows.iter().map(|slot| slot.format("%H:%M").to_string()).collect(),
        columns,
        conflicts,
    };
    Ok(ApiResponse::success("Day view", view, Some(Meta::total_only(total))))
}

pub async fn week_view(state: &AppState, date: NaiveDate) -> AppResult<ApiResponse<RangeView>> {
    let start = dates::week_start(date);
    let end = dates::shift_days(start, 6);
    range_view(state, start, end, "Week view")
}

pub async fn month_view(state: &AppState, date: NaiveDate) -> AppResult<ApiResponse<RangeView>> {
    let start = dates::month_start(date);
    let end = dates::month_end(date);
    range_view(state, start, end, "Month view")
}

fn range_view(
    state: &AppState,
    start: NaiveDate,
    end: NaiveDate,
    message: &str,
) -> AppResult<ApiResponse<RangeView>> {
    let mut items = state.store.appointments.filter(|a| {
        let date = a.starts_at.date_naive();
        date >= start && date <= end
    });
    items.sort_by_key(|a| a.starts_at);

    let active: Vec<Appointment> = items
        .iter()
        .filter(|a| a.status != AppointmentStatus::Canceled)
        .cloned()
        .collect();
    let mut conflicts: Vec<Uuid> = detect_overlaps(&active).into_iter().collect();
    conflicts.sort();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        message,
        RangeView { start_date: start, end_date: end, items, conflicts },
        Some(Meta::total_only(total)),
    ))
}

struct ResolvedItem {
    procedure_id: Uuid,
    professional_id: Uuid,
    name: String,
    price: Decimal,
    qty: u32,
}

/// Checks every referenced professional and procedure, then resolves prices
/// with override precedence: an enabled override's price beats the base.
fn resolve_items(
    store: &Store,
    default_professional: Uuid,
    items: &[BookingItem],
) -> AppResult<Vec<ResolvedItem>> {
    if items.is_empty() {
        return Err(AppError::BadRequest("At least one procedure item is required".into()));
    }

    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        let professional_id = item.professional_id.unwrap_or(default_professional);
        if store.professionals.get(professional_id).is_none() {
            return Err(AppError::BadRequest(format!("Unknown professional {professional_id}")));
        }
        let procedure = store.procedures.get(item.procedure_id).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown procedure {}", item.procedure_id))
        })?;
        let qty = item.qty.unwrap_or(1);
        if qty == 0 {
            return Err(AppError::BadRequest("qty must be at least 1".into()));
        }

        let price = store
            .procedure_overrides
            .find(|o| {
                o.professional_id == professional_id
                    && o.procedure_id == procedure.id
                    && o.enabled
            })
            .and_then(|o| o.price)
            .unwrap_or(procedure.base_price);

        resolved.push(ResolvedItem {
            procedure_id: procedure.id,
            professional_id,
            name: procedure.name,
            price,
            qty,
        });
    }
    Ok(resolved)
}

/// Snapshot lines for the appointment record, one line per unit.
fn booking_lines(resolved: &[ResolvedItem]) -> Vec<ProcedureLine> {
    resolved
        .iter()
        .flat_map(|item| {
            std::iter::repeat_with(|| ProcedureLine {
                id: item.procedure_id,
                name: item.name.clone(),
                price: item.price,
            })
            .take(item.qty as usize)
        })
        .collect()
}

fn checkout_lines(items: &[LineItem]) -> Vec<ProcedureLine> {
    items
        .iter()
        .flat_map(|item| {
            std::iter::repeat_with(|| ProcedureLine {
                id: item.procedure_id,
                name: item.name.clone(),
                price: item.price,
            })
            .take(item.qty as usize)
        })
        .collect()
}

fn resolve_customer(
    state: &AppState,
    payload: &CreateAppointmentRequest,
) -> AppResult<CustomerRef> {
    if let Some(id) = payload.customer_id {
        let existing = state
            .store
            .customers
            .get(id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown customer {id}")))?;
        return Ok(CustomerRef { id: existing.id, name: existing.name });
    }

    let name = payload.customer_name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::BadRequest("customer_id or customer_name is required".into()));
    }

    // Walk-ins get filed as customers so the booking links somewhere.
    let now = Utc::now();
    let created = state.store.customers.insert(Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: None,
        phone: payload.customer_phone.clone().unwrap_or_default(),
        birth_date: None,
        preferences: Vec::new(),
        notes: None,
        created_at: now,
        updated_at: now,
    });
    Ok(CustomerRef { id: created.id, name: created.name })
}

fn parse_slot(raw: &str, field: &str) -> AppResult<NaiveTime> {
    dates::parse_hhmm(raw)
        .ok_or_else(|| AppError::BadRequest(format!("{field} must be HH:MM")))
}

fn has_conflict(
    store: &Store,
    professional_id: Uuid,
    starts_at: DateTime<FixedOffset>,
    ends_at: DateTime<FixedOffset>,
    skip: Option<Uuid>,
) -> bool {
    store
        .appointments
        .find(|a| {
            skip != Some(a.id)
                && a.professional_id == professional_id
                && a.status != AppointmentStatus::Canceled
                && a.starts_at < ends_at
                && starts_at < a.ends_at
        })
        .is_some()
}

/// Grid rows for one day: the weekday's business-hours intervals stepped by
/// the slot granularity, or the 8→20 default grid when the day is closed.
fn slot_rows(hours: &BusinessHours, date: NaiveDate) -> Vec<NaiveTime> {
    let day = DayKey::from_weekday(date.weekday());
    let step = u32::try_from(hours.default_slot_minutes).unwrap_or(30).max(1);

    let schedule = hours
        .days
        .iter()
        .find(|d| d.day == day)
        .filter(|d| d.enabled && !d.intervals.is_empty());

    let Some(schedule) = schedule else {
        return dates::hhmm_range(8, 20, step);
    };

    let mut rows = Vec::new();
    for interval in &schedule.intervals {
        let mut minute = interval.start.num_seconds_from_midnight() / 60;
        let end = interval.end.num_seconds_from_midnight() / 60;
        while minute < end {
            if let Some(slot) = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0) {
                rows.push(slot);
            }
            minute += step;
        }
    }
    rows.sort();
    rows.dedup();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayInterval, DaySchedule};

    fn hours_with(day: DayKey, enabled: bool, intervals: Vec<DayInterval>) -> BusinessHours {
        BusinessHours {
            timezone: dates::STUDIO_TZ.to_string(),
            default_slot_minutes: 30,
            days: vec![DaySchedule { day, enabled, intervals }],
        }
    }

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn slot_rows_follow_the_day_intervals() {
        // 2025-09-03 is a Wednesday.
        let hours = hours_with(
            DayKey::Wed,
            true,
            vec![DayInterval { start: t(9, 0), end: t(11, 0) }],
        );
        let rows = slot_rows(&hours, d(2025, 9, 3));
        assert_eq!(rows, vec![t(9, 0), t(9, 30), t(10, 0), t(10, 30)]);
    }

    #[test]
    fn slot_rows_merge_split_shifts() {
        let hours = hours_with(
            DayKey::Wed,
            true,
            vec![
                DayInterval { start: t(9, 0), end: t(10, 0) },
                DayInterval { start: t(14, 0), end: t(15, 0) },
            ],
        );
        let rows = slot_rows(&hours, d(2025, 9, 3));
        assert_eq!(rows, vec![t(9, 0), t(9, 30), t(14, 0), t(14, 30)]);
    }

    #[test]
    fn slot_rows_fall_back_when_closed() {
        let hours = hours_with(DayKey::Sat, false, Vec::new());
        let rows = slot_rows(&hours, d(2025, 9, 6));
        assert_eq!(rows.first(), Some(&t(8, 0)));
        assert_eq!(rows.last(), Some(&t(19, 30)));
        assert_eq!(rows.len(), 24);
    }
}
