//! Point-of-sale checkout math: subtotal, discount, commission, payment fee
//! and net receivable. Everything here is pure arithmetic over the inputs;
//! validation and persistence live with the callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Percent,
    Fixed,
}

/// Cost model of a payment method: percentage-of-total or flat amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeSchedule {
    pub fee_type: FeeType,
    pub fee_value: Decimal,
}

impl FeeSchedule {
    /// Fee charged on `total`. A fixed fee ignores the total entirely.
    pub fn amount_for(&self, total: Decimal) -> Decimal {
        match self.fee_type {
            FeeType::Percent => total * self.fee_value / Decimal::ONE_HUNDRED,
            FeeType::Fixed => self.fee_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub id: Uuid,
    pub procedure_id: Uuid,
    pub professional_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

/// Discount entry from the checkout form. An absolute `value` wins outright
/// over `pct` when both are present; a zero value falls through to the
/// percentage, matching the form's behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscountSpec {
    pub pct: Option<Decimal>,
    pub value: Option<Decimal>,
}

impl DiscountSpec {
    pub fn amount_on(&self, subtotal: Decimal) -> Decimal {
        match self.value {
            Some(value) if !value.is_zero() => value,
            _ => match self.pct {
                Some(pct) => subtotal * pct / Decimal::ONE_HUNDRED,
                None => Decimal::ZERO,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    /// `subtotal - discount_amount`, before any manual override. Kept
    /// unclamped: a discount larger than the subtotal drives it negative.
    pub calculated_total: Decimal,
    /// The total everything downstream is based on: the manual override when
    /// one was entered, otherwise `calculated_total`.
    pub effective_total: Decimal,
    pub commission_amount: Decimal,
    pub fee_amount: Decimal,
    pub net_amount: Decimal,
}

/// Computes the full checkout breakdown.
///
/// When `manual_total` is set it replaces the subtotal-minus-discount figure;
/// the discount fields then only describe what the operator typed and no
/// longer feed the result. Commission and the payment fee are both taken on
/// the effective total, not the subtotal. A missing fee schedule (no payment
/// method selected, or an unknown one) charges nothing.
pub fn compute_totals(
    items: &[LineItem],
    discount: &DiscountSpec,
    manual_total: Option<Decimal>,
    commission_pct: Decimal,
    fee: Option<&FeeSchedule>,
) -> Totals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| item.price * Decimal::from(item.qty))
        .sum();

    let discount_amount = discount.amount_on(subtotal);
    let calculated_total = subtotal - discount_amount;
    let effective_total = manual_total.unwrap_or(calculated_total);

    let commission_amount = effective_total * commission_pct / Decimal::ONE_HUNDRED;
    let fee_amount = fee
        .map(|schedule| schedule.amount_for(effective_total))
        .unwrap_or(Decimal::ZERO);

    Totals {
        subtotal,
        discount_amount,
        calculated_total,
        effective_total,
        commission_amount,
        fee_amount,
        net_amount: effective_total - fee_amount,
    }
}
