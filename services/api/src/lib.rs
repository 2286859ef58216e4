mod cli;
mod dashboard;
mod infra;
mod routes;
mod server;

use acc_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
