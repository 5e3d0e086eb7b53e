pub mod error;
pub mod source;
pub mod types;

pub use error::ReportError;
pub use source::ReportSource;
pub use types::{ProbeResult, Report, Summary};
