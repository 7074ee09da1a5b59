mod check;
mod cli;
mod infra;
mod routes;
mod server;

use credit_check::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
