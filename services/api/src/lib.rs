mod cli;
mod demo;
mod geocode;
mod infra;
mod routes;
mod server;

use survey_quote::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
