use std::sync::Arc;

use rust_decimal_macros::dec;
use salon_agenda_api::{
    billing::FeeType,
    config::AppConfig,
    dto::{
        permissions::{UpdateRoleMatrixRequest, UpdateUserRoleRequest},
        settings::{
            CreateClosureRequest, CreatePaymentMethodRequest, CreateProcedureRequest,
            MatrixToggleRequest, UpdatePaymentMethodRequest,
        },
    },
    error::AppError,
    models::{ClosureScope, DayKey},
    rbac::Role,
    routes::params::ClosureQuery,
    services::{catalog_service, permission_service},
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

#[tokio::test]
async fn payment_method_crud_round_trip() -> anyhow::Result<()> {
    let state = seeded_state();

    let created = catalog_service::create_payment_method(
        &state,
        CreatePaymentMethodRequest {
            name: "Cartão Crédito 3x".into(),
            fee_type: FeeType::Percent,
            fee_value: dec!(3.79),
            active: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(created.active);
    assert_eq!(state.store.payment_methods.len(), 5);

    let updated = catalog_service::update_payment_method(
        &state,
        created.id,
        UpdatePaymentMethodRequest {
            name: None,
            fee_type: None,
            fee_value: Some(dec!(2.99)),
            active: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.fee.fee_value, dec!(2.99));
    assert_eq!(updated.name, "Cartão Crédito 3x");

    catalog_service::delete_payment_method(&state, created.id).await?;
    assert_eq!(state.store.payment_methods.len(), 4);

    let err = catalog_service::delete_payment_method(&state, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn matrix_toggle_creates_and_removes_rows() -> anyhow::Result<()> {
    let state = seeded_state();
    let juliana = professional_id(&state, "Juliana Santos");
    let botox = procedure_id(&state, "Botox");
    assert_eq!(state.store.procedure_overrides.len(), 2);

    // Enabling a cell with no row files a bare override.
    catalog_service::toggle_matrix_cell(
        &state,
        MatrixToggleRequest {
            professional_id: juliana,
            procedure_id: botox,
            enabled: true,
        },
    )
    .await?;
    let row = state
        .store
        .procedure_overrides
        .find(|o| o.professional_id == juliana && o.procedure_id == botox)
        .expect("bare override row");
    assert!(row.enabled);
    assert_eq!(row.price, None);
    assert_eq!(row.commission_pct, None);
    assert_eq!(state.store.procedure_overrides.len(), 3);

    // Disabling removes the row entirely.
    catalog_service::toggle_matrix_cell(
        &state,
        MatrixToggleRequest {
            professional_id: juliana,
            procedure_id: botox,
            enabled: false,
        },
    )
    .await?;
    assert_eq!(state.store.procedure_overrides.len(), 2);
    assert!(state
        .store
        .procedure_overrides
        .find(|o| o.professional_id == juliana && o.procedure_id == botox)
        .is_none());

    // Disabling an absent cell is a no-op, not an error.
    catalog_service::toggle_matrix_cell(
        &state,
        MatrixToggleRequest {
            professional_id: juliana,
            procedure_id: botox,
            enabled: false,
        },
    )
    .await?;
    assert_eq!(state.store.procedure_overrides.len(), 2);

    Ok(())
}

#[tokio::test]
async fn business_hours_update_and_validation() -> anyhow::Result<()> {
    let state = seeded_state();

    let mut hours = catalog_service::get_business_hours(&state).await?.data.unwrap();
    assert_eq!(hours.days.len(), 7);
    assert_eq!(hours.default_slot_minutes, 30);

    hours.default_slot_minutes = 15;
    if let Some(saturday) = hours.days.iter_mut().find(|d| d.day == DayKey::Sat) {
        saturday.enabled = true;
    }
    let updated = catalog_service::update_business_hours(&state, hours.clone())
        .await?
        .data
        .unwrap();
    assert_eq!(updated.default_slot_minutes, 15);

    let stored = catalog_service::get_business_hours(&state).await?.data.unwrap();
    assert!(stored.days.iter().find(|d| d.day == DayKey::Sat).unwrap().enabled);

    // The agenda runs in a single pinned timezone.
    let mut foreign = stored.clone();
    foreign.timezone = "UTC".into();
    let err = catalog_service::update_business_hours(&state, foreign)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut short_week = stored;
    short_week.days.pop();
    let err = catalog_service::update_business_hours(&state, short_week)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn business_hours_serialize_as_hhmm() -> anyhow::Result<()> {
    let state = seeded_state();
    let hours = catalog_service::get_business_hours(&state).await?.data.unwrap();

    let json = serde_json::to_value(&hours)?;
    let monday = &json["days"][0];
    assert_eq!(monday["intervals"][0]["start"], "09:00");
    assert_eq!(monday["intervals"][0]["end"], "18:00");

    Ok(())
}

#[tokio::test]
async fn closure_scope_rules() -> anyhow::Result<()> {
    let state = seeded_state();

    // Professional closures need a professional.
    let err = catalog_service::create_closure(
        &state,
        CreateClosureRequest {
            scope: ClosureScope::Professional,
            title: "Licença".into(),
            from: chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            to: chrono::NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            professional_id: None,
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Global closures drop any professional reference.
    let global = catalog_service::create_closure(
        &state,
        CreateClosureRequest {
            scope: ClosureScope::Global,
            title: "Natal".into(),
            from: chrono::NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            to: chrono::NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
            professional_id: Some(professional_id(&state, "Juliana Santos")),
            note: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(global.professional_id, None);

    let globals = catalog_service::list_closures(
        &state,
        ClosureQuery {
            scope: Some(ClosureScope::Global),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(globals.items.len(), 3);

    let personal = catalog_service::list_closures(
        &state,
        ClosureQuery {
            scope: Some(ClosureScope::Professional),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(personal.items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn procedure_validation_and_cascade() -> anyhow::Result<()> {
    let state = seeded_state();

    let err = catalog_service::create_procedure(
        &state,
        CreateProcedureRequest {
            name: "Peeling".into(),
            category: None,
            duration_min: 0,
            base_price: dec!(200),
            base_commission_pct: dec!(40),
            active: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = catalog_service::create_procedure(
        &state,
        CreateProcedureRequest {
            name: "Peeling".into(),
            category: None,
            duration_min: 45,
            base_price: dec!(200),
            base_commission_pct: dec!(101),
            active: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Deleting a procedure drops its matrix rows too.
    assert_eq!(state.store.procedure_overrides.len(), 2);
    let corte = procedure_id(&state, "Corte Feminino");
    catalog_service::delete_procedure(&state, corte).await?;
    assert_eq!(state.store.procedure_overrides.len(), 1);

    Ok(())
}

#[tokio::test]
async fn role_matrix_overlay_keeps_untouched_keys() -> anyhow::Result<()> {
    let state = seeded_state();

    let matrix = permission_service::get_matrix(&state).await?.data.unwrap();
    assert_eq!(matrix.roles.len(), 4);

    let mut grants = std::collections::BTreeMap::new();
    grants.insert("reports.read".to_string(), true);
    let updated = permission_service::update_matrix(
        &state,
        Role::Recepcao,
        UpdateRoleMatrixRequest { grants },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.grants.get("reports.read"), Some(&true));
    // Untouched keys keep their defaults.
    assert_eq!(updated.grants.get("agenda.read"), Some(&true));
    assert_eq!(updated.grants.get("settings.configure"), Some(&false));

    let mut unknown = std::collections::BTreeMap::new();
    unknown.insert("stock.read".to_string(), true);
    let err = permission_service::update_matrix(
        &state,
        Role::Recepcao,
        UpdateRoleMatrixRequest { grants: unknown },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

#[tokio::test]
async fn user_role_reassignment() -> anyhow::Result<()> {
    let state = seeded_state();
    let joao = state
        .store
        .staff_users
        .find(|u| u.name == "João Costa")
        .expect("seeded staff user");
    assert_eq!(joao.role, Role::Profissional);

    let updated = permission_service::update_user_role(
        &state,
        joao.id,
        UpdateUserRoleRequest { role: Role::Gestor },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.role, Role::Gestor);

    let err = permission_service::update_user_role(
        &state,
        Uuid::new_v4(),
        UpdateUserRoleRequest { role: Role::Admin },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}
