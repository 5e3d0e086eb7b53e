pub mod config;
pub mod datetime;

pub use config::Config;
