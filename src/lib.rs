pub mod backend;
pub mod cli;
pub mod errors;
pub mod models;
pub mod repl;
pub mod utils;
pub mod workflow;
