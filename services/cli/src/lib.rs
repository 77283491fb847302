mod cli;
mod demo;
mod infra;
mod report;

use lab_alloc::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
