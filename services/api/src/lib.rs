mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use movein_guide::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
