//! Dashboard Web Server
//!
//! Serves the dashboard page for a single report loaded at startup.
//! Features:
//! - Loading / error / content views
//! - Filter controls that re-render only the results table
//! - Raw report and load status endpoints

pub mod api;
pub mod server;

pub use server::{DashboardServer, ServerConfig};
