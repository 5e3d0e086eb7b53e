use serde::Serialize;

/// Radius of the score ring in SVG user units
pub const RING_RADIUS: f64 = 90.0;

/// Colour tier of the health score ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Danger,
    Warning,
    Neutral,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score < 70.0 {
            ScoreTier::Danger
        } else if score < 90.0 {
            ScoreTier::Warning
        } else {
            ScoreTier::Neutral
        }
    }

    /// Class added to the ring; neutral carries none
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            ScoreTier::Danger => Some("danger"),
            ScoreTier::Warning => Some("warning"),
            ScoreTier::Neutral => None,
        }
    }
}

/// Response time classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Fast,
    Normal,
    Slow,
}

impl SpeedTier {
    pub fn from_ms(ms: f64) -> Self {
        if ms < 500.0 {
            SpeedTier::Fast
        } else if ms < 2000.0 {
            SpeedTier::Normal
        } else {
            SpeedTier::Slow
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SpeedTier::Fast => "fast",
            SpeedTier::Normal => "normal",
            SpeedTier::Slow => "slow",
        }
    }
}

pub fn ring_circumference() -> f64 {
    2.0 * std::f64::consts::PI * RING_RADIUS
}

/// Dash offset that leaves `score`% of the ring stroked.
/// Scores outside 0..=100 are clamped.
pub fn ring_offset(score: f64) -> f64 {
    let circumference = ring_circumference();
    let fraction = score.clamp(0.0, 100.0) / 100.0;
    circumference - fraction * circumference
}

/// Round to the nearest millisecond for display, halves away from zero
pub fn format_ms(ms: f64) -> String {
    format!("{:.0}ms", ms.round())
}
