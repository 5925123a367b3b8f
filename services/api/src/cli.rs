use crate::commands::{
    run_analyze, run_comps, run_mortgage, run_rent_valuation, AnalyzeArgs, CompsArgs,
    MortgageArgs, RentValuationArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use deal_analyst::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Real Estate Deal Analyst",
    about = "Comparable properties, mortgage cashflow and rent-based valuation for residential deals",
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
    /// Find comparable properties matching an address keyword
    Comps(CompsArgs),
    /// Compute monthly PITI, loan-to-value and cashflow for a purchase
    Mortgage(MortgageArgs),
    /// Estimate value implied by rent at a target cap rate
    RentValuation(RentValuationArgs),
    /// Run comps, mortgage and rent valuation together for one address
    Analyze(AnalyzeArgs),
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
        Command::Comps(args) => run_blocking(move || run_comps(args)).await,
        Command::Mortgage(args) => run_mortgage(args),
        Command::RentValuation(args) => run_rent_valuation(args),
        Command::Analyze(args) => run_blocking(move || run_analyze(args)).await,
    }
}

// Comps lookups use a blocking HTTP client, which must stay off the async workers.
async fn run_blocking<F>(job: F) -> Result<(), AppError>
where
    F: FnOnce() -> Result<(), AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| AppError::Task(err.to_string()))?
}
