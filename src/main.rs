// Module declarations
mod cli;
mod config;
mod document;
mod markdown;
mod navigate;
mod toc;
mod utils;

#[tokio::main]
async fn main() {
    // Run the CLI
    cli::run().await;
}
