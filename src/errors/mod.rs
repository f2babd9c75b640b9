pub mod types;

pub use types::ConsoleError;
