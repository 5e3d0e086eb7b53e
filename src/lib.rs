pub mod dashboard;
pub mod render;
pub mod report;
pub mod server;
pub mod utils;

// Re-export common items
pub use dashboard::{DashboardState, Filter, ViewPhase};
pub use report::{Report, ReportError, ReportSource};
pub use utils::Config;
