use crate::demo::{run_outcodes, run_quote, OutcodesArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use survey_quote::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Survey Quote Service",
    about = "Run the quoting service or compute estimates from the command line",
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
    /// Compute a fee estimate and print the breakdown
    Quote(QuoteArgs),
    /// Search the served outcodes by code, label, or area name
    Outcodes(OutcodesArgs),
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
        Command::Quote(args) => run_quote(args),
        Command::Outcodes(args) => run_outcodes(args),
    }
}
