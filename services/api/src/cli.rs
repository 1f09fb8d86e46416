use crate::demo::{run_demo, run_portfolio_report, DemoArgs, PortfolioReportArgs};
use crate::error::AppError;
use crate::server;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Credit Document Intelligence",
    about = "Run the MSME credit assessment pipeline from the command line",
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
    /// Portfolio-level reporting over application rosters
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommand,
    },
    /// Run an end-to-end CLI demo covering extraction and eligibility
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PortfolioCommand {
    /// Risk-score a roster CSV and print the portfolio summary
    Report(PortfolioReportArgs),
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
        Command::Portfolio {
            command: PortfolioCommand::Report(args),
        } => run_portfolio_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
