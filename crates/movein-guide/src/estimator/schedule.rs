/// Tunable fee constants applied by the estimator.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    /// Agent commission as a multiple of one month's rent (1.0 + 10% tax).
    pub agent_fee_multiplier: f64,
    /// Flat fire-insurance premium collected at move-in, in yen.
    pub fire_insurance: u64,
    /// Initial guarantee-company rate over rent + maintenance + parking.
    pub guarantee_rate: f64,
    /// Pet deposit expressed in months of rent.
    pub pet_fee_months: u32,
}

impl FeeSchedule {
    pub fn standard() -> Self {
        Self {
            agent_fee_multiplier: 1.1,
            fire_insurance: 20_000,
            guarantee_rate: 0.2,
            pet_fee_months: 1,
        }
    }
}
