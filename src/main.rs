use clap::Parser;
use gh_issue_digest::cli::{run, Cli};
use std::process::exit;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();

    match run(&cli).await {
        Ok(count) => {
            log::info!("Printed {} issues", count);
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit(1);
        }
    }
}
