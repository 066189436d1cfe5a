use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AppointmentStatus, ClosureScope};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Inclusive civil-date range over `starts_at`.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub professional_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

/// Saved customer segments from the dashboard's list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    All,
    NewThisMonth,
    BirthdaysThisMonth,
    Risk,
    HighPotential,
    #[serde(rename = "growth_3months")]
    Growth3Months,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Matches name, phone or email.
    pub q: Option<String>,
    pub cohort: Option<Cohort>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClosureQuery {
    pub scope: Option<ClosureScope>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
