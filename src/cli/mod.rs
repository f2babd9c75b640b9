pub mod commands;
pub mod console;
pub mod query;
pub mod report;
pub mod scan;
pub mod scans;

pub use commands::{Cli, Commands};
