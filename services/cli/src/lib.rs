mod cli;
mod infra;
mod report;

use kpi_scorecard::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
