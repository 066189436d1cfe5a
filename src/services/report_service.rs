use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    billing::{self, DiscountSpec},
    dto::reports::{ProfessionalRevenue, RevenueReport},
    error::{AppError, AppResult},
    models::{AppointmentStatus, PaymentStatus},
    response::{ApiResponse, Meta},
    routes::params::ReportRangeQuery,
    state::AppState,
};

/// Revenue over a civil-date range, counting completed appointments whose
/// payment settled. Commission and fees are recomputed from the paid amount
/// so the report always reflects the current fee schedules.
pub async fn revenue_report(
    state: &AppState,
    query: ReportRangeQuery,
) -> AppResult<ApiResponse<RevenueReport>> {
    if query.start_date > query.end_date {
        return Err(AppError::BadRequest("start_date must not be after end_date".into()));
    }

    let paid = state.store.appointments.filter(|a| {
        let date = a.starts_at.date_naive();
        a.status == AppointmentStatus::Completed
            && date >= query.start_date
            && date <= query.end_date
            && a.payment
                .as_ref()
                .is_some_and(|p| p.status == PaymentStatus::Paid && p.amount.is_some())
    });

    let mut report = RevenueReport {
        start_date: query.start_date,
        end_date: query.end_date,
        appointments: paid.len() as i64,
        total_revenue: Decimal::ZERO,
        total_commission: Decimal::ZERO,
        total_fees: Decimal::ZERO,
        total_net: Decimal::ZERO,
        by_professional: Vec::new(),
        top_professionals: Vec::new(),
    };

    let mut buckets: HashMap<Uuid, ProfessionalRevenue> = HashMap::new();
    for appointment in &paid {
        let Some(payment) = appointment.payment.as_ref() else { continue };
        let Some(amount) = payment.amount else { continue };

        let method = payment
            .method_id
            .and_then(|method_id| state.store.payment_methods.get(method_id));
        let totals = billing::compute_totals(
            &[],
            &DiscountSpec::default(),
            Some(amount),
            state.config.default_commission_pct,
            method.as_ref().map(|m| &m.fee),
        );

        report.total_revenue += totals.effective_total;
        report.total_commission += totals.commission_amount;
        report.total_fees += totals.fee_amount;
        report.total_net += totals.net_amount;

        let bucket = buckets
            .entry(appointment.professional_id)
            .or_insert_with(|| ProfessionalRevenue {
                professional_id: appointment.professional_id,
                professional_name: professional_name(state, appointment.professional_id),
                appointments: 0,
                revenue: Decimal::ZERO,
                commission: Decimal::ZERO,
            });
        bucket.appointments += 1;
        bucket.revenue += totals.effective_total;
        bucket.commission += totals.commission_amount;
    }

    let mut by_professional: Vec<ProfessionalRevenue> = buckets.into_values().collect();
    by_professional.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    report.top_professionals = by_professional.iter().take(3).cloned().collect();
    report.by_professional = by_professional;

    let total = report.appointments;
    Ok(ApiResponse::success("Revenue report", report, Some(Meta::total_only(total))))
}

fn professional_name(state: &AppState, id: Uuid) -> String {
    state
        .store
        .professionals
        .get(id)
        .map(|p| p.name)
        .unwrap_or_else(|| "Unknown".to_string())
}
