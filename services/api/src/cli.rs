use crate::demo::{run_access_check, AccessCheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use realty_console::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Realty Back-Office Console",
    about = "Run the role-gated realty back-office service from the command line",
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
    /// Evaluate the access gate without starting the service
    Access {
        #[command(subcommand)]
        command: AccessCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AccessCommand {
    /// Decide whether a session may enter a protected area
    Check(AccessCheckArgs),
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
        Command::Access {
            command: AccessCommand::Check(args),
        } => run_access_check(args),
    }
}
