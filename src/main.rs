use std::process;
use clap::Parser;

use newspulse::cli::Cli;

#[tokio::main]
async fn main() {
    // Pick up NEWSPULSE_* overrides from a local .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.run().await {
        Ok(_) => {
            // Command completed successfully
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
