//! Todo Server command-line client

use clap::Parser;
use todo_http::cli::{Cli, handle_cli_command};

#[tokio::main]
async fn main() {
    todo_http::telemetry::init();
    let cli = Cli::parse();

    if let Err(e) = handle_cli_command(cli).await {
        eprintln!("Error: {e}");
        if e.requires_login() {
            eprintln!("Run `todo login --username <USER> --password <PASSWORD>` to obtain a token.");
        } else if e.is_configuration_error() {
            eprintln!("Run `todo --help` for usage.");
        }
        std::process::exit(1);
    }
}
