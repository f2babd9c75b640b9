use clap::Parser;
use tracing_subscriber::EnvFilter;

use apidefender_console::cli::{self, Cli, Commands};
use apidefender_console::errors::ConsoleError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let backend_url = cli.backend_url.clone();
    let result = match cli.command {
        Commands::Console => cli::console::handle_console(&backend_url).await,
        Commands::Scan(args) => cli::scan::handle_scan(args, &backend_url).await,
        Commands::Query(args) => cli::query::handle_query(args, &backend_url).await,
        Commands::Report(args) => cli::report::handle_report(args, &backend_url).await,
        Commands::Scans => cli::scans::handle_scans(&backend_url).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                ConsoleError::Catalog(_) => 2,
                ConsoleError::MissingBaseUrl
                | ConsoleError::UnknownField(_)
                | ConsoleError::InvalidFieldValue { .. } => 3,
                ConsoleError::Submission(_) => 4,
                ConsoleError::Network(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
