use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::billing::Totals;
use crate::models::{Appointment, CancelReason, Professional};

/// One service line of a booking or checkout. `professional_id` defaults to
/// the appointment's professional, `qty` to 1.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingItem {
    pub procedure_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub qty: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    /// Existing customer. When absent, `customer_name` (plus an optional
    /// `customer_phone`) books a walk-in and files them as a new customer.
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub items: Vec<BookingItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub professional_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    /// `HH:MM`
    pub start_time: Option<String>,
    /// `HH:MM`
    pub end_time: Option<String>,
    pub items: Option<Vec<BookingItem>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelAppointmentRequest {
    pub reason: CancelReason,
    pub notes: Option<String>,
}

/// The POS checkout form. Items default to the appointment's booked
/// procedures; commission to the configured default.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteAppointmentRequest {
    pub items: Option<Vec<BookingItem>>,
    pub discount_pct: Option<Decimal>,
    pub discount_value: Option<Decimal>,
    pub manual_total: Option<Decimal>,
    pub commission_pct: Option<Decimal>,
    pub payment_method_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessionalList {
    pub items: Vec<Professional>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentList {
    pub items: Vec<Appointment>,
}

/// Booking result. `conflict` flags a double booking against the same
/// professional; the booking still goes through.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookedAppointment {
    pub appointment: Appointment,
    pub conflict: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompletedCheckout {
    pub appointment: Appointment,
    pub totals: Totals,
}

/// One agenda column: a professional and their appointments bucketed by
/// `HH:MM` slot.
#[derive(Debug, Serialize, ToSchema)]
pub struct DayColumn {
    pub professional: Professional,
    pub appointments: BTreeMap<String, Vec<Appointment>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DayView {
    pub date: NaiveDate,
    /// Grid rows, `HH:MM`, from the business hours of that weekday.
    pub slots: Vec<String>,
    pub columns: Vec<DayColumn>,
    /// Ids of double-booked appointments on this day.
    pub conflicts: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RangeView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub items: Vec<Appointment>,
    pub conflicts: Vec<Uuid>,
}
