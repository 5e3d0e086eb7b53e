//! Dashboard output: HTML page and fragments, terminal text, JSON snapshot

pub mod html;
pub mod json;
pub mod text;

use std::time::Duration;

use crate::utils::datetime::DateStyle;
use crate::utils::Config;

pub use html::{render_page, DashboardView};
pub use json::{render_json, DashboardSnapshot};
pub use text::render_text;

/// Settings shared by all renderers
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub date_style: DateStyle,
    pub counter_duration: Duration,
    pub frame_interval: Duration,
    pub ring_delay_ms: u64,
    /// Served by `serve`: filters call back to the server
    pub live: bool,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            date_style: DateStyle::for_locale(&config.resolved_locale()),
            counter_duration: config.counter_duration(),
            frame_interval: config.frame_interval(),
            ring_delay_ms: config.ring_delay_ms,
            live: false,
        }
    }

    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
