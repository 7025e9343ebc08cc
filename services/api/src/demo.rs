use crate::infra::{standard_estimator, standard_evaluator, InMemoryMessageSink};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;
use movein_guide::contact::{ContactService, ContactSubmission};
use movein_guide::error::AppError;
use movein_guide::estimator::{format_yen, CostEstimateInput, CostEstimateResult};
use movein_guide::hours::BusinessStatus;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Desired move-in date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) move_in_date: NaiveDate,
    /// Monthly rent in yen
    #[arg(long)]
    pub(crate) rent: u32,
    /// Monthly maintenance fee in yen
    #[arg(long, default_value_t = 0)]
    pub(crate) maintenance: u32,
    /// Security deposit in months of rent
    #[arg(long, default_value_t = 1.0)]
    pub(crate) deposit_months: f64,
    /// Key money in months of rent
    #[arg(long, default_value_t = 1.0)]
    pub(crate) key_money_months: f64,
    /// Monthly parking fee in yen
    #[arg(long, default_value_t = 0)]
    pub(crate) parking: u32,
    /// Waive the current month's rent (free-rent campaign)
    #[arg(long)]
    pub(crate) free_rent: bool,
    /// Add the pet deposit
    #[arg(long)]
    pub(crate) pet_fee: bool,
    /// Drop the agent commission
    #[arg(long)]
    pub(crate) no_agent_fee: bool,
}

impl EstimateArgs {
    fn into_input(self) -> CostEstimateInput {
        CostEstimateInput {
            move_in_date: Some(self.move_in_date),
            monthly_rent: self.rent,
            maintenance_fee: self.maintenance,
            deposit_months: self.deposit_months,
            key_money_months: self.key_money_months,
            parking_fee: self.parking,
            free_rent_applied: self.free_rent,
            pet_fee_applied: self.pet_fee,
            agent_fee_waived: self.no_agent_fee,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct HoursArgs {
    /// Timestamp to evaluate (YYYY-MM-DDTHH:MM[:SS]); defaults to now
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) at: Option<NaiveDateTime>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Move-in date for the estimate portion (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) move_in_date: Option<NaiveDate>,
    /// Monthly rent for the estimate portion
    #[arg(long, default_value_t = 100_000)]
    pub(crate) rent: u32,
    /// Force the delivery-failure branch of the contact demo
    #[arg(long)]
    pub(crate) fail_delivery: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let estimator = standard_estimator();
    let result = estimator.estimate(&args.into_input())?;
    render_estimate(&result);
    Ok(())
}

pub(crate) fn run_hours(args: HoursArgs) -> Result<(), AppError> {
    let at = args.at.unwrap_or_else(|| Local::now().naive_local());
    let status = standard_evaluator().evaluate(at);
    render_status(at, &status);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        move_in_date,
        rent,
        fail_delivery,
    } = args;

    println!("Move-in guide desk demo");

    let move_in_date = move_in_date.unwrap_or_else(|| Local::now().date_naive());
    let input = CostEstimateInput {
        move_in_date: Some(move_in_date),
        monthly_rent: rent,
        maintenance_fee: 5_000,
        ..CostEstimateInput::default()
    };
    let result = standard_estimator().estimate(&input)?;
    println!("\nCost estimate for a move-in on {move_in_date}");
    render_estimate(&result);

    let now = Local::now().naive_local();
    let status = standard_evaluator().evaluate(now);
    println!();
    render_status(now, &status);

    println!("\nContact intake demo");
    let sink = Arc::new(InMemoryMessageSink::default());
    // Short delay so the demo stays snappy; the service uses the
    // configured 1.5s delay.
    let service = ContactService::new(sink.clone(), Duration::from_millis(50));

    let invalid = ContactSubmission {
        name: "Tanaka Taro".to_string(),
        email: "tanaka.example.com".to_string(),
        message: "Is the corner unit still available?".to_string(),
        ..ContactSubmission::default()
    };
    match service.submit(invalid).await {
        Ok(_) => println!("- Unexpectedly accepted an invalid submission"),
        Err(err) => println!("- Rejected invalid submission: {err}"),
    }

    if fail_delivery {
        sink.fail_next();
    }
    let submission = ContactSubmission {
        name: "Tanaka Taro".to_string(),
        email: "tanaka@example.com".to_string(),
        phone: "090-1234-5678".to_string(),
        subject: "Availability".to_string(),
        message: "Is the corner unit still available?".to_string(),
    };
    match service.submit(submission).await {
        Ok(receipt) => {
            println!("- Accepted {} -> {}", receipt.receipt_id.0, receipt.confirmation);
        }
        Err(err) => println!("- Submission failed: {err}"),
    }
    println!("- Messages delivered: {}", sink.messages().len());

    Ok(())
}

pub(crate) fn render_estimate(result: &CostEstimateResult) {
    for item in &result.line_items {
        println!("- {}: {}", item.label, format_yen(item.amount));
    }
    println!("Total move-in cost: {}", format_yen(result.total));
}

pub(crate) fn render_status(at: NaiveDateTime, status: &BusinessStatus) {
    println!("Desk status at {at}");
    println!(
        "- {} ({}): {}",
        status.headline,
        if status.is_open { "open" } else { "closed" },
        status.detail
    );
}
