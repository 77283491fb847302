use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_allocate, AllocateArgs};
use clap::{Parser, Subcommand};
use lab_alloc::config::AppConfig;
use lab_alloc::error::AppError;
use lab_alloc::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "lab-alloc",
    about = "Assign applicants to capacity-limited labs from ranked preferences",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate seats from preference and capacity CSV files
    Allocate(AllocateArgs),
    /// Walk through the built-in allocation scenarios
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    match cli.command {
        Command::Allocate(args) => run_allocate(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
