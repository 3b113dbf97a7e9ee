mod cli;
mod commands;
mod demo;
mod infra;
mod render;

use placement_tracker::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
