use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use std::fmt::Display;

/// How a locale writes the time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// `14:07:03`
    H24,
    /// `02:07:03 PM`
    AmPmSuffix,
    /// `PM 02:07:03`
    AmPmPrefix,
    /// Locale's own morning/afternoon words, glued to the hour: `下午02:07:03`
    Meridiem {
        am: &'static str,
        pm: &'static str,
    },
}

impl Clock {
    fn format<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Clock::H24 => date.format("%H:%M:%S").to_string(),
            Clock::AmPmSuffix => date.format("%I:%M:%S %p").to_string(),
            Clock::AmPmPrefix => date.format("%p %I:%M:%S").to_string(),
            Clock::Meridiem { am, pm } => {
                let marker = if date.hour() < 12 { am } else { pm };
                format!("{}{}", marker, date.format("%I:%M:%S"))
            }
        }
    }
}

/// Numeric date/time conventions for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    /// chrono pattern for the date part
    pub date: &'static str,
    pub joiner: &'static str,
    pub clock: Clock,
}

impl DateStyle {
    /// Conventions for a BCP 47 style tag such as `zh-TW` or `en_GB`
    pub fn for_locale(tag: &str) -> Self {
        let tag = tag.replace('_', "-").to_ascii_lowercase();
        let language = tag.split('-').next().unwrap_or("");

        let style = |date, joiner, clock| DateStyle { date, joiner, clock };

        match (language, tag.as_str()) {
            ("en", "en" | "en-us" | "en-ph") => style("%m/%d/%Y", ", ", Clock::AmPmSuffix),
            ("en", "en-ca") => style("%Y-%m-%d", ", ", Clock::AmPmSuffix),
            ("zh", "zh-tw" | "zh-hant" | "zh-hant-tw") => style(
                "%Y/%m/%d",
                " ",
                Clock::Meridiem {
                    am: "上午",
                    pm: "下午",
                },
            ),
            ("zh" | "ja", _) => style("%Y/%m/%d", " ", Clock::H24),
            ("ko", _) => style("%Y. %m. %d.", " ", Clock::AmPmPrefix),
            ("sv" | "lt", _) => style("%Y-%m-%d", " ", Clock::H24),
            ("de" | "ru" | "pl" | "cs" | "fi" | "nb" | "da" | "tr" | "uk", _) => {
                style("%d.%m.%Y", ", ", Clock::H24)
            }
            ("nl", _) => style("%d-%m-%Y", ", ", Clock::H24),
            ("fr", _) => style("%d/%m/%Y", " ", Clock::H24),
            _ => style("%d/%m/%Y", ", ", Clock::H24),
        }
    }

    fn format<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!(
            "{}{}{}",
            date.format(self.date),
            self.joiner,
            self.clock.format(date)
        )
    }
}

/// Format the report's `testDate` for the viewer's local time zone
pub fn format_test_date(raw: &str, style: &DateStyle) -> String {
    format_test_date_in(raw, style, &Local)
}

/// Format `testDate` in `tz`. Naive timestamps are taken as already in `tz`.
/// Unparseable input is returned unchanged.
pub fn format_test_date_in<Tz>(raw: &str, style: &DateStyle, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_test_date(raw, tz) {
        Some(date) => style.format(&date),
        None => {
            log::debug!("Unrecognised testDate {:?}, showing as-is", raw);
            raw.to_string()
        }
    }
}

fn parse_test_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(tz));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}
