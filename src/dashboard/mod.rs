//! View model for the dashboard: filters, tiers, animation and view state

pub mod animation;
pub mod filter;
pub mod state;
pub mod tier;
pub mod view;

pub use animation::Tween;
pub use filter::{filter_results, Filter};
pub use state::{DashboardState, ViewPhase};
pub use tier::{ScoreTier, SpeedTier};
pub use view::{alerts, AlertEntry, ResultRow, Severity};
