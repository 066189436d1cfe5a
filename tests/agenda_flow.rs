use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use salon_agenda_api::{
    config::AppConfig,
    dto::agenda::{
        BookingItem, CancelAppointmentRequest, CompleteAppointmentRequest,
        CreateAppointmentRequest,
    },
    error::AppError,
    models::{AppointmentStatus, CancelReason, PaymentStatus},
    routes::params::ReportRangeQuery,
    services::{agenda_service, report_service},
    state::AppState,
    store::Store,
};
use uuid::Uuid;

fn seeded_state() -> AppState {
    let store = Arc::new(Store::new());
    store.seed_demo();
    AppState {
        store,
        config: AppConfig::default(),
    }
}

fn professional_id(state: &AppState, name: &str) -> Uuid {
    state
        .store
        .professionals
        .find(|p| p.name == name)
        .expect("seeded professional")
        .id
}

fn procedure_id(state: &AppState, name: &str) -> Uuid {
    state
        .store
        .procedures
        .find(|p| p.name == name)
        .expect("seeded procedure")
        .id
}

fn customer_id(state: &AppState, name: &str) -> Uuid {
    state
        .store
        .customers
        .find(|c| c.name == name)
        .expect("seeded customer")
        .id
}

fn payment_method_id(state: &AppState, name: &str) -> Uuid {
    state
        .store
        .payment_methods
        .find(|m| m.name == name)
        .expect("seeded payment method")
        .id
}

fn booking(
    state: &AppState,
    customer: &str,
    professional: &str,
    date: NaiveDate,
    start: &str,
    end: &str,
    procedure: &str,
) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        customer_id: Some(customer_id(state, customer)),
        customer_name: None,
        customer_phone: None,
        professional_id: professional_id(state, professional),
        date,
        start_time: start.into(),
        end_time: end.into(),
        items: vec![BookingItem {
            procedure_id: procedure_id(state, procedure),
            professional_id: None,
            qty: None,
        }],
        notes: None,
    }
}

fn empty_checkout() -> CompleteAppointmentRequest {
    CompleteAppointmentRequest {
        items: None,
        discount_pct: None,
        discount_value: None,
        manual_total: None,
        commission_pct: None,
        payment_method_id: None,
    }
}

// Booking -> double-booking flag -> confirm -> card checkout -> revenue report.
#[tokio::test]
async fn booking_checkout_and_report_flow() -> anyhow::Result<()> {
    let state = seeded_state();
    let friday = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();

    // Book a free morning slot.
    let booked = agenda_service::create_appointment(
        &state,
        booking(&state, "Maria Silva Santos", "Dr. Ana Paula Silva", friday, "09:00", "10:00", "Limpeza de Pele"),
    )
    .await?
    .data
    .unwrap();
    assert!(!booked.conflict);
    assert_eq!(booked.appointment.status, AppointmentStatus::ToConfirm);
    assert_eq!(booked.appointment.procedures.len(), 1);
    assert_eq!(booked.appointment.procedures[0].price, dec!(120));

    // A second booking over the same window flags the double booking but still lands.
    let clash = agenda_service::create_appointment(
        &state,
        booking(&state, "Ana Carolina Lima", "Dr. Ana Paula Silva", friday, "09:30", "10:30", "Design de Sobrancelhas"),
    )
    .await?
    .data
    .unwrap();
    assert!(clash.conflict);

    // Confirm, then close out at the desk on credit.
    let confirmed = agenda_service::confirm_appointment(&state, booked.appointment.id)
        .await?
        .data
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let checkout = agenda_service::complete_appointment(
        &state,
        booked.appointment.id,
        CompleteAppointmentRequest {
            payment_method_id: Some(payment_method_id(&state, "Cartão Crédito 1x")),
            ..empty_checkout()
        },
    )
    .await?
    .data
    .unwrap();

    // 2.49% card fee on 120; commission at the configured 40%.
    assert_eq!(checkout.totals.subtotal, dec!(120));
    assert_eq!(checkout.totals.effective_total, dec!(120));
    assert_eq!(checkout.totals.commission_amount, dec!(48));
    assert_eq!(checkout.totals.fee_amount, dec!(2.988));
    assert_eq!(checkout.totals.net_amount, dec!(117.012));

    assert_eq!(checkout.appointment.status, AppointmentStatus::Completed);
    let payment = checkout.appointment.payment.expect("payment stamped");
    assert_eq!(payment.status, PaymentStatus::Paid);
    assert_eq!(payment.amount, Some(dec!(120)));
    assert_eq!(payment.method_name.as_deref(), Some("Cartão Crédito 1x"));

    // The report for that Friday reflects the settled checkout.
    let report = report_service::revenue_report(
        &state,
        ReportRangeQuery {
            start_date: friday,
            end_date: friday,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(report.appointments, 1);
    assert_eq!(report.total_revenue, dec!(120));
    assert_eq!(report.total_commission, dec!(48));
    assert_eq!(report.total_fees, dec!(2.988));
    assert_eq!(report.total_net, dec!(117.012));
    assert_eq!(report.by_professional.len(), 1);
    assert_eq!(report.by_professional[0].professional_name, "Dr. Ana Paula Silva");
    assert_eq!(report.top_professionals.len(), 1);

    Ok(())
}

#[tokio::test]
async fn day_view_flags_the_seeded_double_booking() -> anyhow::Result<()> {
    let state = seeded_state();
    let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    let view = agenda_service::day_view(&state, wednesday).await?.data.unwrap();

    assert_eq!(view.columns.len(), 3);
    // Default hours grid: 09:00 to 18:00 in 30-minute rows.
    assert_eq!(view.slots.first().map(String::as_str), Some("09:00"));
    assert_eq!(view.slots.len(), 18);
    // The 09:00-10:30 and 10:00-11:00 sessions share a professional.
    assert_eq!(view.conflicts.len(), 2);

    let ana = professional_id(&state, "Dr. Ana Paula Silva");
    let column = view
        .columns
        .iter()
        .find(|c| c.professional.id == ana)
        .expect("column for the seeded professional");
    assert!(column.appointments.contains_key("09:00"));
    assert!(column.appointments.contains_key("10:00"));

    Ok(())
}

#[tokio::test]
async fn week_view_spans_monday_to_sunday() -> anyhow::Result<()> {
    let state = seeded_state();
    let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    let view = agenda_service::week_view(&state, wednesday).await?.data.unwrap();

    assert_eq!(view.start_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    assert_eq!(view.end_date, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
    // All six seeded sessions fall inside this week, sorted by start.
    assert_eq!(view.items.len(), 6);
    assert_eq!(view.conflicts.len(), 2);
    assert!(view.items.windows(2).all(|w| w[0].starts_at <= w[1].starts_at));

    Ok(())
}

#[tokio::test]
async fn canceling_a_session_clears_the_day_conflict() -> anyhow::Result<()> {
    let state = seeded_state();
    let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
    let first = state
        .store
        .appointments
        .find(|a| a.notes.as_deref() == Some("Primeira sessão"))
        .expect("seeded first session");

    let canceled = agenda_service::cancel_appointment(
        &state,
        first.id,
        CancelAppointmentRequest {
            reason: CancelReason::ClientCancelled,
            notes: Some("remarcar".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(canceled.status, AppointmentStatus::Canceled);
    assert!(canceled.cancellation.is_some());

    let view = agenda_service::day_view(&state, wednesday).await?.data.unwrap();
    assert!(view.conflicts.is_empty());

    Ok(())
}

#[tokio::test]
async fn closed_appointments_reject_lifecycle_moves() {
    let state = seeded_state();
    let completed = state
        .store
        .appointments
        .find(|a| a.status == AppointmentStatus::Completed)
        .expect("seeded completed appointment");

    let err = agenda_service::confirm_appointment(&state, completed.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = agenda_service::cancel_appointment(
        &state,
        completed.id,
        CancelAppointmentRequest {
            reason: CancelReason::Other,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = agenda_service::complete_appointment(&state, completed.id, empty_checkout())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn walk_in_booking_files_a_customer() -> anyhow::Result<()> {
    let state = seeded_state();
    let friday = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
    let before = state.store.customers.len();

    let booked = agenda_service::create_appointment(
        &state,
        CreateAppointmentRequest {
            customer_id: None,
            customer_name: Some("Cliente Nova".into()),
            customer_phone: Some("(11) 97777-9999".into()),
            professional_id: professional_id(&state, "Juliana Santos"),
            date: friday,
            start_time: "11:00".into(),
            end_time: "11:45".into(),
            items: vec![BookingItem {
                procedure_id: procedure_id(&state, "Manicure"),
                professional_id: None,
                qty: None,
            }],
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(state.store.customers.len(), before + 1);
    let filed = state
        .store
        .customers
        .get(booked.appointment.customer.id)
        .expect("walk-in filed as a customer");
    assert_eq!(filed.name, "Cliente Nova");
    assert_eq!(filed.phone, "(11) 97777-9999");

    Ok(())
}

#[tokio::test]
async fn quantity_expands_into_repeated_lines() -> anyhow::Result<()> {
    let state = seeded_state();
    let friday = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();

    let mut request = booking(
        &state,
        "Juliana Oliveira",
        "Juliana Santos",
        friday,
        "14:00",
        "15:30",
        "Manicure",
    );
    request.items[0].qty = Some(2);

    let booked = agenda_service::create_appointment(&state, request)
        .await?
        .data
        .unwrap();
    assert_eq!(booked.appointment.procedures.len(), 2);
    assert!(booked.appointment.procedures.iter().all(|line| line.price == dec!(35)));

    // Manual total wins over the computed one; commission follows the request.
    let checkout = agenda_service::complete_appointment(
        &state,
        booked.appointment.id,
        CompleteAppointmentRequest {
            manual_total: Some(dec!(60)),
            commission_pct: Some(dec!(50)),
            ..empty_checkout()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(checkout.totals.subtotal, dec!(70));
    assert_eq!(checkout.totals.effective_total, dec!(60));
    assert_eq!(checkout.totals.commission_amount, dec!(30));
    assert_eq!(checkout.totals.fee_amount, dec!(0));
    assert_eq!(checkout.totals.net_amount, dec!(60));

    Ok(())
}

#[tokio::test]
async fn override_price_beats_the_base() -> anyhow::Result<()> {
    let state = seeded_state();
    let friday = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();

    // The seeded matrix prices Corte Feminino at 90 for this professional.
    let booked = agenda_service::create_appointment(
        &state,
        booking(&state, "Camila Santos", "Dr. Ana Paula Silva", friday, "15:00", "16:00", "Corte Feminino"),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(booked.appointment.procedures[0].price, dec!(90));

    Ok(())
}

#[tokio::test]
async fn booking_validates_times_and_items() {
    let state = seeded_state();
    let friday = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();

    let inverted = CreateAppointmentRequest {
        start_time: "10:00".into(),
        end_time: "09:00".into(),
        ..booking(&state, "Maria Silva Santos", "Dr. Ana Paula Silva", friday, "09:00", "10:00", "Limpeza de Pele")
    };
    let err = agenda_service::create_appointment(&state, inverted)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let no_items = CreateAppointmentRequest {
        items: Vec::new(),
        ..booking(&state, "Maria Silva Santos", "Dr. Ana Paula Silva", friday, "09:00", "10:00", "Limpeza de Pele")
    };
    let err = agenda_service::create_appointment(&state, no_items)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut unknown = booking(&state, "Maria Silva Santos", "Dr. Ana Paula Silva", friday, "09:00", "10:00", "Limpeza de Pele");
    unknown.items[0].procedure_id = Uuid::new_v4();
    let err = agenda_service::create_appointment(&state, unknown)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
