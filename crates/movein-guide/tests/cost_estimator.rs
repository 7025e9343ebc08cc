use chrono::NaiveDate;
use movein_guide::estimator::{
    format_yen, CostEstimateInput, EstimateError, FeeSchedule, MoveInCostEstimator,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn base_input() -> CostEstimateInput {
    CostEstimateInput {
        move_in_date: Some(date(2025, 6, 10)),
        monthly_rent: 100_000,
        maintenance_fee: 5_000,
        deposit_months: 1.0,
        key_money_months: 1.0,
        parking_fee: 0,
        free_rent_applied: false,
        pet_fee_applied: false,
        agent_fee_waived: false,
    }
}

#[test]
fn worked_example_matches_published_breakdown() {
    // June 2025 has 30 days; moving in on the 10th leaves 21 billable days.
    let estimator = MoveInCostEstimator::standard();
    let result = estimator.estimate(&base_input()).expect("valid input");

    let amounts: Vec<(&str, u64)> = result
        .line_items
        .iter()
        .map(|item| (item.label.as_str(), item.amount))
        .collect();

    assert_eq!(
        amounts,
        vec![
            ("Security deposit", 100_000),
            ("Key money", 100_000),
            ("Agent commission (1 month + tax)", 110_000),
            ("Advance rent (21 days prorated + next month)", 179_999),
            ("Fire insurance", 20_000),
            ("Guarantee company fee (initial 20%)", 21_000),
        ]
    );
    assert_eq!(result.total, 530_999);
    assert_eq!(format_yen(result.total), "¥530,999");
}

#[test]
fn total_always_equals_sum_of_line_items() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.parking_fee = 8_000;
    input.pet_fee_applied = true;
    input.deposit_months = 1.5;
    input.key_money_months = 0.5;

    let result = estimator.estimate(&input).expect("valid input");
    let summed: u64 = result.line_items.iter().map(|item| item.amount).sum();
    assert_eq!(result.total, summed);
}

#[test]
fn estimate_is_reproducible_for_identical_input() {
    let estimator = MoveInCostEstimator::standard();
    let input = base_input();

    let first = estimator.estimate(&input).expect("valid input");
    let second = estimator.estimate(&input).expect("valid input");
    assert_eq!(first, second);
}

#[test]
fn last_day_of_month_bills_a_single_prorated_day() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.move_in_date = Some(date(2025, 6, 30));

    let result = estimator.estimate(&input).expect("valid input");
    let advance = result
        .line_items
        .iter()
        .find(|item| item.label.starts_with("Advance rent"))
        .expect("advance rent always present");

    assert_eq!(advance.label, "Advance rent (1 days prorated + next month)");
    // One day at 3333.33 yen, plus maintenance twice and next month's rent.
    assert_eq!(advance.amount, 3_333 + 5_000 + 100_000 + 5_000);
}

#[test]
fn free_rent_charges_only_the_following_month() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.free_rent_applied = true;

    let result = estimator.estimate(&input).expect("valid input");
    let advance_items: Vec<_> = result
        .line_items
        .iter()
        .filter(|item| item.label.starts_with("Advance rent"))
        .collect();

    assert_eq!(advance_items.len(), 1);
    assert_eq!(advance_items[0].label, "Advance rent (next month only)");
    assert_eq!(advance_items[0].amount, 105_000);

    // The same holds regardless of the move-in day.
    input.move_in_date = Some(date(2025, 2, 1));
    let other = estimator.estimate(&input).expect("valid input");
    let advance = other
        .line_items
        .iter()
        .find(|item| item.label.starts_with("Advance rent"))
        .expect("advance rent present");
    assert_eq!(advance.amount, 105_000);
}

#[test]
fn waived_agent_fee_removes_the_line_item_entirely() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.agent_fee_waived = true;

    let result = estimator.estimate(&input).expect("valid input");
    assert!(result
        .line_items
        .iter()
        .all(|item| !item.label.starts_with("Agent commission")));
    assert_eq!(result.total, 530_999 - 110_000);
}

#[test]
fn zero_multipliers_drop_deposit_and_key_money() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.deposit_months = 0.0;
    input.key_money_months = 0.0;

    let result = estimator.estimate(&input).expect("valid input");
    assert!(result
        .line_items
        .iter()
        .all(|item| item.label != "Security deposit" && item.label != "Key money"));
}

#[test]
fn parking_is_billed_for_two_months_only_when_present() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.parking_fee = 12_000;

    let result = estimator.estimate(&input).expect("valid input");
    let parking = result
        .line_items
        .iter()
        .find(|item| item.label == "Parking (2 months)")
        .expect("parking line present");
    assert_eq!(parking.amount, 24_000);

    // Parking also feeds the guarantee fee base.
    let guarantee = result
        .line_items
        .iter()
        .find(|item| item.label.starts_with("Guarantee company fee"))
        .expect("guarantee line present");
    assert_eq!(guarantee.amount, (100_000 + 5_000 + 12_000) / 5);

    input.parking_fee = 0;
    let without = estimator.estimate(&input).expect("valid input");
    assert!(without
        .line_items
        .iter()
        .all(|item| item.label != "Parking (2 months)"));
}

#[test]
fn pet_fee_adds_one_month_of_rent() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.pet_fee_applied = true;

    let result = estimator.estimate(&input).expect("valid input");
    let pet = result
        .line_items
        .iter()
        .find(|item| item.label == "Pet deposit")
        .expect("pet line present");
    assert_eq!(pet.amount, 100_000);
    assert_eq!(
        result.line_items.last().expect("items not empty").label,
        "Pet deposit"
    );
}

#[test]
fn missing_move_in_date_wins_over_missing_rent() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.move_in_date = None;
    input.monthly_rent = 0;

    match estimator.estimate(&input) {
        Err(EstimateError::MissingMoveInDate) => {}
        other => panic!("expected missing move-in date, got {other:?}"),
    }
}

#[test]
fn zero_rent_short_circuits_before_any_line_item() {
    let estimator = MoveInCostEstimator::standard();
    let mut input = base_input();
    input.monthly_rent = 0;

    match estimator.estimate(&input) {
        Err(EstimateError::MissingRent) => {}
        other => panic!("expected missing rent, got {other:?}"),
    }
}

#[test]
fn custom_schedule_flows_through_fixed_items() {
    let schedule = FeeSchedule {
        agent_fee_multiplier: 1.0,
        fire_insurance: 15_000,
        guarantee_rate: 0.5,
        pet_fee_months: 2,
    };
    let estimator = MoveInCostEstimator::new(schedule);
    let mut input = base_input();
    input.pet_fee_applied = true;

    let result = estimator.estimate(&input).expect("valid input");
    assert!(result
        .line_items
        .iter()
        .any(|item| item.label == "Agent commission (1 month + tax)" && item.amount == 100_000));
    assert!(result
        .line_items
        .iter()
        .any(|item| item.label == "Fire insurance" && item.amount == 15_000));
    assert!(result
        .line_items
        .iter()
        .any(|item| item.label == "Guarantee company fee (initial 50%)" && item.amount == 52_500));
    assert!(result
        .line_items
        .iter()
        .any(|item| item.label == "Pet deposit" && item.amount == 200_000));
}
