//! Move-in cost estimation.
//!
//! Produces an ordered, itemized breakdown of the one-time costs due at
//! move-in. Every amount truncates toward zero independently; the prorated
//! daily rate is carried in hundredths of a yen so the truncation points
//! are exact and reproducible across platforms.

mod domain;
mod schedule;

pub use domain::{format_yen, CostEstimateInput, CostEstimateResult, CostLineItem, EstimateError};
pub use schedule::FeeSchedule;

use chrono::{Datelike, NaiveDate};

/// Stateless calculator applying a fee schedule to a tenancy input.
pub struct MoveInCostEstimator {
    schedule: FeeSchedule,
}

impl MoveInCostEstimator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn standard() -> Self {
        Self::new(FeeSchedule::standard())
    }

    /// Validates the input and builds the line items in display order.
    ///
    /// Either both validations pass and a full result is returned, or the
    /// estimate aborts before any computation.
    pub fn estimate(&self, input: &CostEstimateInput) -> Result<CostEstimateResult, EstimateError> {
        let move_in = input.move_in_date.ok_or(EstimateError::MissingMoveInDate)?;
        if input.monthly_rent == 0 {
            return Err(EstimateError::MissingRent);
        }

        let rent = u64::from(input.monthly_rent);
        let maintenance = u64::from(input.maintenance_fee);
        let parking = u64::from(input.parking_fee);

        let mut line_items = Vec::new();

        let deposit = floor_multiple(rent, input.deposit_months);
        if deposit > 0 {
            line_items.push(CostLineItem {
                label: "Security deposit".to_string(),
                amount: deposit,
            });
        }

        let key_money = floor_multiple(rent, input.key_money_months);
        if key_money > 0 {
            line_items.push(CostLineItem {
                label: "Key money".to_string(),
                amount: key_money,
            });
        }

        if !input.agent_fee_waived {
            line_items.push(CostLineItem {
                label: "Agent commission (1 month + tax)".to_string(),
                amount: floor_multiple(rent, self.schedule.agent_fee_multiplier),
            });
        }

        // Advance rent is always charged, even when it computes to zero.
        if input.free_rent_applied {
            // Current month waived; only the following month is billed.
            line_items.push(CostLineItem {
                label: "Advance rent (next month only)".to_string(),
                amount: rent + maintenance,
            });
        } else {
            let days_in_month = days_in_month(move_in);
            let remaining_days = days_in_month - u64::from(move_in.day()) + 1;
            let daily_rent_hundredths = rent * 100 / days_in_month;
            let prorated = daily_rent_hundredths * remaining_days / 100;
            line_items.push(CostLineItem {
                label: format!("Advance rent ({remaining_days} days prorated + next month)"),
                amount: prorated + maintenance + rent + maintenance,
            });
        }

        if parking > 0 {
            // Current and next month.
            line_items.push(CostLineItem {
                label: "Parking (2 months)".to_string(),
                amount: parking * 2,
            });
        }

        line_items.push(CostLineItem {
            label: "Fire insurance".to_string(),
            amount: self.schedule.fire_insurance,
        });

        line_items.push(CostLineItem {
            label: format!(
                "Guarantee company fee (initial {:.0}%)",
                self.schedule.guarantee_rate * 100.0
            ),
            amount: floor_multiple(rent + maintenance + parking, self.schedule.guarantee_rate),
        });

        if input.pet_fee_applied {
            line_items.push(CostLineItem {
                label: "Pet deposit".to_string(),
                amount: rent * u64::from(self.schedule.pet_fee_months),
            });
        }

        let total = line_items.iter().map(|item| item.amount).sum();
        Ok(CostEstimateResult { line_items, total })
    }
}

fn floor_multiple(amount: u64, multiplier: f64) -> u64 {
    (amount as f64 * multiplier).floor() as u64
}

fn days_in_month(date: NaiveDate) -> u64 {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of current month is valid");
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .expect("first of next month is valid");
    (first_of_next - first).num_days() as u64
}
