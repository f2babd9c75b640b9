use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apidefender-console",
    version,
    about = "Terminal console for the API Defender scanning service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub backend_url: String,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive console
    Console,
    /// Submit a scan without the interactive console
    Scan(ScanArgs),
    /// Query a session's progress
    Query(QueryArgs),
    /// Fetch a session's report
    Report(ReportArgs),
    /// List scans recorded by the backend
    Scans,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Target API base URL
    #[arg(short, long)]
    pub base_url: String,

    /// OpenAPI document path on the scanner
    #[arg(long)]
    pub openapi: Option<String>,

    /// JWT token file path on the scanner
    #[arg(long)]
    pub token_file: Option<String>,

    /// Scan preset (catalog-advertised)
    #[arg(long)]
    pub preset: Option<String>,

    /// Scan time limit, e.g. 5m or 30s
    #[arg(long)]
    pub timeout: Option<String>,

    /// Parallel requests (empty = auto)
    #[arg(long)]
    pub concurrency: Option<u32>,

    /// Comma-separated paths reachable without auth
    #[arg(long)]
    pub public_paths: Option<String>,

    /// Exploitation depth (catalog-advertised)
    #[arg(long)]
    pub exploit_depth: Option<String>,

    /// Cap on exploitation operations
    #[arg(long)]
    pub max_exploit_ops: Option<u32>,

    /// Scanner log level (catalog-advertised)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Block, poll progress until the scan ends, then print the report
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Session id to query
    pub session_id: String,

    /// Output raw JSON snapshots
    #[arg(long)]
    pub json: bool,

    /// Keep polling until the session ends
    #[arg(long)]
    pub follow: bool,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "1500")]
    pub interval_ms: u64,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Session id
    pub session_id: String,

    /// Output the raw report JSON
    #[arg(long)]
    pub json: bool,
}
