use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfessionalRevenue {
    pub professional_id: Uuid,
    pub professional_name: String,
    pub appointments: i64,
    pub revenue: Decimal,
    pub commission: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub appointments: i64,
    pub total_revenue: Decimal,
    pub total_commission: Decimal,
    pub total_fees: Decimal,
    pub total_net: Decimal,
    pub by_professional: Vec<ProfessionalRevenue>,
    /// Top three professionals by revenue.
    pub top_professionals: Vec<ProfessionalRevenue>,
}
