pub mod catalog;
pub mod report;
pub mod scan_config;
pub mod session;

pub use catalog::*;
pub use report::*;
pub use scan_config::*;
pub use session::*;
