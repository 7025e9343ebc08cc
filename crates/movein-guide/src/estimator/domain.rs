use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tenancy parameters captured from the cost simulator form.
///
/// Monetary fields are whole yen; the deposit and key money are expressed
/// as (possibly fractional) months of rent, matching the form controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimateInput {
    pub move_in_date: Option<NaiveDate>,
    pub monthly_rent: u32,
    pub maintenance_fee: u32,
    pub deposit_months: f64,
    pub key_money_months: f64,
    pub parking_fee: u32,
    pub free_rent_applied: bool,
    pub pet_fee_applied: bool,
    pub agent_fee_waived: bool,
}

impl Default for CostEstimateInput {
    /// Mirrors the simulator form defaults: one month each of deposit and
    /// key money, everything else empty.
    fn default() -> Self {
        Self {
            move_in_date: None,
            monthly_rent: 0,
            maintenance_fee: 0,
            deposit_months: 1.0,
            key_money_months: 1.0,
            parking_fee: 0,
            free_rent_applied: false,
            pet_fee_applied: false,
            agent_fee_waived: false,
        }
    }
}

/// One display row of the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub label: String,
    pub amount: u64,
}

/// Ordered breakdown plus the grand total. Built once per calculation and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimateResult {
    pub line_items: Vec<CostLineItem>,
    pub total: u64,
}

/// User-facing validation failures, checked in form order; the first
/// failure aborts the estimate before any line item is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("please choose a desired move-in date")]
    MissingMoveInDate,
    #[error("please enter the monthly rent")]
    MissingRent,
}

/// Formats whole yen with grouped thousands, e.g. `¥123,456`.
pub fn format_yen(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("¥{grouped}")
}
