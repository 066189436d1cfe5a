use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::billing::FeeSchedule;
use crate::rbac::Role;

/// Canonical appointment lifecycle. The dashboard's card views used a second
/// vocabulary (`scheduled`/`in_service`/`no_show`); those map onto this one,
/// with no-shows recorded as cancellations carrying `CancelReason::NoShow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    ToConfirm,
    Confirmed,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Canceled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    ClientCancelled,
    Rescheduled,
    ProfessionalUnavailable,
    Duplicate,
    NoShow,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cancellation {
    pub reason: CancelReason,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerRef {
    pub id: Uuid,
    pub name: String,
}

/// Procedure snapshot embedded in an appointment. Prices are copied from the
/// catalog at booking time so later catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcedureLine {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentInfo {
    pub method_id: Option<Uuid>,
    pub method_name: Option<String>,
    pub status: PaymentStatus,
    pub amount: Option<Decimal>,
    pub paid_at: Option<DateTime<FixedOffset>>,
}

/// Instants carry the studio's fixed UTC offset (−03:00); the civil date and
/// HH:MM slot of `starts_at` are read in that offset, never converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub customer: CustomerRef,
    pub professional_id: Uuid,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub status: AppointmentStatus,
    pub cancellation: Option<Cancellation>,
    pub procedures: Vec<ProcedureLine>,
    pub payment: Option<PaymentInfo>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub preferences: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub color: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Procedure {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub duration_min: i32,
    pub base_price: Decimal,
    pub base_commission_pct: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-professional row of the procedure matrix. A row's presence means the
/// professional offers the procedure; `None` fields fall back to the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcedureOverride {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub procedure_id: Uuid,
    pub price: Option<Decimal>,
    pub commission_pct: Option<Decimal>,
    pub duration_min: Option<i32>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub fee: FeeSchedule,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComboItem {
    pub procedure_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Combo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<ComboItem>,
    pub discount_type: DiscountKind,
    pub discount_value: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayKey::Mon,
            chrono::Weekday::Tue => DayKey::Tue,
            chrono::Weekday::Wed => DayKey::Wed,
            chrono::Weekday::Thu => DayKey::Thu,
            chrono::Weekday::Fri => DayKey::Fri,
            chrono::Weekday::Sat => DayKey::Sat,
            chrono::Weekday::Sun => DayKey::Sun,
        }
    }
}

/// Wire format for interval bounds. The settings form sends strict `HH:MM`;
/// chrono's own format would be `HH:MM:SS`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::scheduling::dates::parse_hhmm;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_hhmm(&raw).ok_or_else(|| serde::de::Error::custom("expected HH:MM"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayInterval {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "18:00")]
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub day: DayKey,
    pub enabled: bool,
    pub intervals: Vec<DayInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessHours {
    pub timezone: String,
    pub default_slot_minutes: i32,
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClosureScope {
    Global,
    Professional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Closure {
    pub id: Uuid,
    pub scope: ClosureScope,
    pub title: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub professional_id: Option<Uuid>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}
