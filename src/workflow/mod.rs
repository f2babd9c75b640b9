pub mod context;
pub mod controller;
pub mod help;
pub mod poller;
pub mod renderer;
pub mod report_view;

pub use context::{ConsoleContext, Tab};
pub use controller::start_scan;
pub use poller::{start_polling, PollerHandle, POLL_INTERVAL};
pub use report_view::{group_by_category, load_report, ReportView};
