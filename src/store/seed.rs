//! Demo fixtures: three professionals, a busy Wednesday on the agenda
//! (including one deliberate double booking), the customer base and the
//! whole settings catalog.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::billing::{FeeSchedule, FeeType};
use crate::models::{
    Appointment, AppointmentStatus, Closure, ClosureScope, Customer, CustomerRef, PaymentInfo,
    PaymentMethod, PaymentStatus, Procedure, ProcedureLine, ProcedureOverride, Professional,
    StaffUser,
};
use crate::rbac::Role;
use crate::scheduling::dates::studio_instant;

use super::Store;

pub(super) fn populate(store: &Store) {
    if !store.professionals.is_empty() {
        return;
    }

    let professionals = seed_professionals(store);
    let customers = seed_customers(store);
    let procedures = seed_procedures(store);
    let methods = seed_payment_methods(store);
    seed_procedure_overrides(store, &professionals, &procedures);
    seed_closures(store, &professionals);
    seed_appointments(store, &professionals, &customers, &procedures, &methods);
    seed_staff_users(store);
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn utc_at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    day(y, m, d).and_time(hm(hour, minute)).and_utc()
}

fn seed_professionals(store: &Store) -> Vec<Uuid> {
    let rows = vec![
        ("Dr. Ana Paula Silva", "Esteticista", "#8B5CF6"),
        ("Maria Fernanda Costa", "Recepcionista", "#06B6D4"),
        ("Juliana Santos", "Esteticista", "#10B981"),
    ];

    rows.into_iter()
        .map(|(name, role, color)| {
            store
                .professionals
                .insert(Professional {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    role: Some(role.to_string()),
                    color: Some(color.to_string()),
                    active: true,
                })
                .id
        })
        .collect()
}

fn seed_customers(store: &Store) -> Vec<Uuid> {
    let rows = vec![
        (
            "Maria Silva Santos",
            "maria.silva@email.com",
            "(11) 99999-1234",
            day(1985, 9, 15),
            vec!["Limpeza de Pele", "Hidratação Facial", "Design de Sobrancelhas"],
            "Pele sensível, alergia a ácido salicílico",
            utc_at(2024, 7, 15, 10, 0),
        ),
        (
            "Ana Carolina Lima",
            "ana.lima@email.com",
            "(11) 98888-5678",
            day(1992, 9, 22),
            vec!["Extensão de Cílios", "Microagulhamento"],
            "Prefere horários pela manhã",
            utc_at(2024, 8, 1, 14, 30),
        ),
        (
            "Juliana Oliveira",
            "ju.oliveira@email.com",
            "(11) 97777-9012",
            day(1990, 12, 8),
            vec!["Drenagem Linfática", "Radiofrequência", "Peeling"],
            "Cliente VIP, muito pontual",
            utc_at(2024, 5, 28, 9, 15),
        ),
        (
            "Camila Santos",
            "camila@email.com",
            "(11) 97777-1111",
            day(1988, 9, 10),
            vec!["Massagem Relaxante", "Limpeza de Pele"],
            "Cliente nova, interesse em tratamentos faciais",
            utc_at(2024, 9, 1, 15, 0),
        ),
        (
            "Fernanda Costa",
            "fernanda@email.com",
            "(11) 97777-2222",
            day(1993, 3, 5),
            vec!["Botox", "Preenchimento"],
            "Sem contato há mais de 90 dias",
            utc_at(2024, 6, 1, 10, 0),
        ),
        (
            "Patricia Almeida",
            "patricia@email.com",
            "(11) 97777-3333",
            day(1995, 4, 12),
            vec!["Depilação", "Limpeza de Pele", "Hidratação", "Massagem"],
            "Cliente com múltiplos interesses",
            utc_at(2024, 8, 15, 11, 0),
        ),
    ];

    rows.into_iter()
        .map(|(name, email, phone, birth, preferences, notes, created)| {
            store
                .customers
                .insert(Customer {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    email: Some(email.to_string()),
                    phone: phone.to_string(),
                    birth_date: Some(birth),
                    preferences: preferences.into_iter().map(str::to_string).collect(),
                    notes: Some(notes.to_string()),
                    created_at: created,
                    updated_at: created,
                })
                .id
        })
        .collect()
}

fn seed_procedures(store: &Store) -> Vec<Uuid> {
    let rows: Vec<(&str, Option<&str>, i32, Decimal, Decimal)> = vec![
        ("Harmonização Facial", None, 90, dec!(450), dec!(40)),
        ("Limpeza de Pele", None, 60, dec!(120), dec!(40)),
        ("Preenchimento Labial", None, 60, dec!(350), dec!(40)),
        ("Design de Sobrancelhas", None, 45, dec!(80), dec!(40)),
        ("Massagem Relaxante", None, 60, dec!(180), dec!(40)),
        ("Botox", None, 60, dec!(600), dec!(40)),
        ("Corte Feminino", Some("Cabelo"), 60, dec!(80), dec!(40)),
        ("Manicure", Some("Unhas"), 45, dec!(35), dec!(50)),
    ];

    let now = Utc::now();
    rows.into_iter()
        .map(|(name, category, duration_min, base_price, base_commission_pct)| {
            store
                .procedures
                .insert(Procedure {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    category: category.map(str::to_string),
                    duration_min,
                    base_price,
                    base_commission_pct,
                    active: true,
                    created_at: now,
                    updated_at: now,
                })
                .id
        })
        .collect()
}

fn seed_payment_methods(store: &Store) -> Vec<Uuid> {
    let rows = vec![
        ("Dinheiro", FeeType::Fixed, dec!(0)),
        ("PIX", FeeType::Percent, dec!(0)),
        ("Cartão Débito", FeeType::Percent, dec!(1.39)),
        ("Cartão Crédito 1x", FeeType::Percent, dec!(2.49)),
    ];

    let now = Utc::now();
    rows.into_iter()
        .map(|(name, fee_type, fee_value)| {
            store
                .payment_methods
                .insert(PaymentMethod {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    fee: FeeSchedule { fee_type, fee_value },
                    active: true,
                    created_at: now,
                    updated_at: now,
                })
                .id
        })
        .collect()
}

fn seed_procedure_overrides(store: &Store, professionals: &[Uuid], procedures: &[Uuid]) {
    // The settings rows sit after the six agenda procedures.
    let corte = procedures[6];
    let manicure = procedures[7];

    store.procedure_overrides.insert(ProcedureOverride {
        id: Uuid::new_v4(),
        professional_id: professionals[0],
        procedure_id: corte,
        price: Some(dec!(90)),
        commission_pct: Some(dec!(45)),
        duration_min: Some(60),
        enabled: true,
    });
    store.procedure_overrides.insert(ProcedureOverride {
        id: Uuid::new_v4(),
        professional_id: professionals[1],
        procedure_id: manicure,
        price: None,
        commission_pct: None,
        duration_min: None,
        enabled: true,
    });
}

fn seed_closures(store: &Store, professionals: &[Uuid]) {
    let rows = vec![
        ("Ano Novo", ClosureScope::Global, day(2024, 1, 1), day(2024, 1, 1), None, "Feriado nacional"),
        ("Carnaval", ClosureScope::Global, day(2024, 2, 12), day(2024, 2, 14), None, "Feriado municipal"),
        (
            "Férias Ana Silva",
            ClosureScope::Professional,
            day(2024, 7, 1),
            day(2024, 7, 15),
            Some(professionals[0]),
            "Férias de verão",
        ),
    ];

    for (title, scope, from, to, professional_id, note) in rows {
        store.closures.insert(Closure {
            id: Uuid::new_v4(),
            scope,
            title: title.to_string(),
            from,
            to,
            professional_id,
            note: Some(note.to_string()),
        });
    }
}

fn seed_appointments(
    store: &Store,
    professionals: &[Uuid],
    customers: &[Uuid],
    procedures: &[Uuid],
    methods: &[Uuid],
) {
    let wednesday = day(2025, 9, 3);
    let thursday = day(2025, 9, 4);

    let base = |customer: usize,
                customer_name: &str,
                professional: usize,
                date: NaiveDate,
                start: NaiveTime,
                end: NaiveTime,
                status: AppointmentStatus,
                procedure: usize,
                procedure_name: &str,
                price: Decimal| {
        let now = Utc::now();
        Appointment {
            id: Uuid::new_v4(),
            customer: CustomerRef { id: customers[customer], name: customer_name.to_string() },
            professional_id: professionals[professional],
            starts_at: studio_instant(date, start),
            ends_at: studio_instant(date, end),
            status,
            cancellation: None,
            procedures: vec![ProcedureLine {
                id: procedures[procedure],
                name: procedure_name.to_string(),
                price,
            }],
            payment: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    };

    // Booked against the same professional as the completed 10:00 session
    // below; the pair is the known double booking on the demo day.
    let mut harmonizacao = base(
        0,
        "Maria Silva Santos",
        0,
        wednesday,
        hm(9, 0),
        hm(10, 30),
        AppointmentStatus::ToConfirm,
        0,
        "Harmonização Facial",
        dec!(450),
    );
    harmonizacao.notes = Some("Primeira sessão".to_string());
    harmonizacao.payment = Some(PaymentInfo {
        method_id: Some(methods[3]),
        method_name: Some("Cartão Crédito 1x".to_string()),
        status: PaymentStatus::Pending,
        amount: None,
        paid_at: None,
    });
    store.appointments.insert(harmonizacao);

    store.appointments.insert(base(
        1,
        "Ana Carolina Lima",
        2,
        wednesday,
        hm(14, 0),
        hm(15, 0),
        AppointmentStatus::Confirmed,
        1,
        "Limpeza de Pele",
        dec!(120),
    ));

    let mut preenchimento = base(
        2,
        "Juliana Oliveira",
        0,
        wednesday,
        hm(10, 0),
        hm(11, 0),
        AppointmentStatus::Completed,
        2,
        "Preenchimento Labial",
        dec!(350),
    );
    preenchimento.payment = Some(PaymentInfo {
        method_id: Some(methods[0]),
        method_name: Some("Dinheiro".to_string()),
        status: PaymentStatus::Paid,
        amount: Some(dec!(350)),
        paid_at: Some(studio_instant(wednesday, hm(11, 0))),
    });
    store.appointments.insert(preenchimento);

    store.appointments.insert(base(
        0,
        "Maria Silva Santos",
        2,
        wednesday,
        hm(16, 0),
        hm(16, 45),
        AppointmentStatus::ToConfirm,
        3,
        "Design de Sobrancelhas",
        dec!(80),
    ));

    store.appointments.insert(base(
        3,
        "Camila Santos",
        1,
        wednesday,
        hm(11, 30),
        hm(12, 30),
        AppointmentStatus::ToConfirm,
        4,
        "Massagem Relaxante",
        dec!(180),
    ));

    store.appointments.insert(base(
        4,
        "Fernanda Costa",
        0,
        thursday,
        hm(15, 30),
        hm(16, 30),
        AppointmentStatus::ToConfirm,
        5,
        "Botox",
        dec!(600),
    ));
}

fn seed_staff_users(store: &Store) {
    let rows = vec![
        ("Ana Silva", "ana.silva@studioelas.com", Role::Admin),
        ("Carlos Santos", "carlos.santos@studioelas.com", Role::Gestor),
        ("Maria Oliveira", "maria.oliveira@studioelas.com", Role::Recepcao),
        ("João Costa", "joao.costa@studioelas.com", Role::Profissional),
    ];

    for (name, email, role) in rows {
        store.staff_users.insert(StaffUser {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            active: true,
        });
    }
}
