use crate::report::{run_managers, run_report, ManagersArgs, ReportArgs};
use clap::{Parser, Subcommand};
use kpi_scorecard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "scorecard",
    about = "Score weekly KPI exports and classify employees by deviation from target",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a KPI export and summarize each employee
    Report(ReportArgs),
    /// List the managers and teams found in a KPI export
    Managers(ManagersArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => run_report(args),
        Command::Managers(args) => run_managers(args),
    }
}
