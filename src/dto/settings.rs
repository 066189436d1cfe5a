use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::billing::FeeType;
use crate::models::{
    Closure, ClosureScope, Combo, ComboItem, DiscountKind, PaymentMethod, Procedure,
    ProcedureOverride,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentMethodRequest {
    pub name: String,
    pub fee_type: FeeType,
    pub fee_value: Decimal,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentMethodRequest {
    pub name: Option<String>,
    pub fee_type: Option<FeeType>,
    pub fee_value: Option<Decimal>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodList {
    pub items: Vec<PaymentMethod>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProcedureRequest {
    pub name: String,
    pub category: Option<String>,
    pub duration_min: i32,
    pub base_price: Decimal,
    pub base_commission_pct: Decimal,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProcedureRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub duration_min: Option<i32>,
    pub base_price: Option<Decimal>,
    pub base_commission_pct: Option<Decimal>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProcedureList {
    pub items: Vec<Procedure>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub role: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverrideList {
    pub items: Vec<ProcedureOverride>,
}

/// One cell of the professional×procedure matrix. Enabling creates a bare
/// override when none exists; disabling removes the row entirely.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MatrixToggleRequest {
    pub professional_id: Uuid,
    pub procedure_id: Uuid,
    pub enabled: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateComboRequest {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<ComboItem>,
    pub discount_type: DiscountKind,
    pub discount_value: Decimal,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComboRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<ComboItem>>,
    pub discount_type: Option<DiscountKind>,
    pub discount_value: Option<Decimal>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComboList {
    pub items: Vec<Combo>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClosureRequest {
    pub scope: ClosureScope,
    pub title: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Required when `scope` is `professional`.
    pub professional_id: Option<Uuid>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateClosureRequest {
    pub title: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub professional_id: Option<Uuid>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClosureList {
    pub items: Vec<Closure>,
}
