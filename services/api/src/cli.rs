use crate::demo::{run_demo, run_estimate, run_hours, DemoArgs, EstimateArgs, HoursArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use movein_guide::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Move-In Guide Desk",
    about = "Run the move-in guide desk service and its tools from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate the move-in costs for a tenancy
    Estimate(EstimateArgs),
    /// Show the desk's open/closed status
    Hours(HoursArgs),
    /// Run an end-to-end CLI demo covering estimation, hours, and contact intake
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Hours(args) => run_hours(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
