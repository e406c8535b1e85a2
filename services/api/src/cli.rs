use crate::report::{run_calculate, run_required, run_what_if};
use crate::report::{CalculateArgs, RequiredArgs, WhatIfArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use schoolpilot::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SchoolPilot Grades",
    about = "Serve or run the SchoolPilot grade engine from the command line",
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
    /// Run the grade engine against a course JSON file
    Grades {
        #[command(subcommand)]
        command: GradesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GradesCommand {
    /// Print the current overall grade and category breakdown
    Calculate(CalculateArgs),
    /// Solve for the score needed on the next assessment to hit a target
    Required(RequiredArgs),
    /// Project the overall grade after hypothetical scores
    WhatIf(WhatIfArgs),
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
        Command::Grades { command } => match command {
            GradesCommand::Calculate(args) => run_calculate(args),
            GradesCommand::Required(args) => run_required(args),
            GradesCommand::WhatIf(args) => run_what_if(args),
        },
    }
}
