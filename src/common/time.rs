use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::formatting::formatting_failure;
use crate::constants::{DEFAULT_LOCALE, DEFAULT_TIMEZONE};
use crate::types::{FormatCategory, FormatOptions, FormatResult, TimestampInput, UnsupportedOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimestampFormat {
    #[default]
    Full,
    DateOnly,
    TimeOnly,
    Relative,
}

impl FromStr for TimestampFormat {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "FULL" => Ok(TimestampFormat::Full),
            "DATE_ONLY" => Ok(TimestampFormat::DateOnly),
            "TIME_ONLY" => Ok(TimestampFormat::TimeOnly),
            "RELATIVE" => Ok(TimestampFormat::Relative),
            _ => Err(UnsupportedOption::new("timestamp format", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampFormatOptions {
    pub format: TimestampFormat,
    /// `UTC`, `GMT`, `Z` or a fixed offset such as `+09:00` / `UTC-03:30`
    pub timezone: String,
    /// `en-US` or `en-GB`
    pub locale: String,
}

impl Default for TimestampFormatOptions {
    fn default() -> Self {
        Self {
            format: TimestampFormat::Full,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    EnGb,
}

impl FromStr for Locale {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            _ => Err(UnsupportedOption::new("locale", s)),
        }
    }
}

/// Parse a timezone name into a fixed UTC offset
pub fn parse_timezone(timezone: &str) -> Option<FixedOffset> {
    let upper = timezone.trim().to_ascii_uppercase();
    if matches!(upper.as_str(), "UTC" | "GMT" | "Z") {
        return FixedOffset::east_opt(0);
    }

    let offset = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    let (sign, rest) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) || rest.len() > 5 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Format a timestamp into a human-readable string
pub fn format_timestamp(
    value: impl Into<TimestampInput>,
    options: &TimestampFormatOptions,
) -> FormatResult<String> {
    let input = value.into();
    let fail = |message: String| {
        formatting_failure(
            FormatCategory::Timestamp,
            message,
            input.to_string(),
            FormatOptions::Timestamp(options.clone()),
        )
    };

    let instant = resolve_instant(&input).ok_or_else(|| fail("unrecognized timestamp".to_string()))?;
    let offset = parse_timezone(&options.timezone)
        .ok_or_else(|| fail(format!("unsupported timezone: {}", options.timezone)))?;
    let locale: Locale = options.locale.parse().map_err(|e: UnsupportedOption| fail(e.to_string()))?;

    let local = instant.with_timezone(&offset);
    let zone = zone_label(&offset);

    let formatted = match (options.format, locale) {
        (TimestampFormat::Relative, _) => format_relative_time(instant, Utc::now()),
        (TimestampFormat::Full, Locale::EnUs) => format!(
            "{} at {} {}",
            local.format("%A, %B %-d, %Y"),
            local.format("%-I:%M:%S %p"),
            zone
        ),
        (TimestampFormat::Full, Locale::EnGb) => format!(
            "{} at {} {}",
            local.format("%A %-d %B %Y"),
            local.format("%H:%M:%S"),
            zone
        ),
        (TimestampFormat::DateOnly, Locale::EnUs) => local.format("%b %-d, %Y").to_string(),
        (TimestampFormat::DateOnly, Locale::EnGb) => local.format("%-d %b %Y").to_string(),
        (TimestampFormat::TimeOnly, Locale::EnUs) => format!("{} {}", local.format("%-I:%M:%S %p"), zone),
        (TimestampFormat::TimeOnly, Locale::EnGb) => format!("{} {}", local.format("%H:%M:%S"), zone),
    };

    Ok(formatted)
}

/// Render the time elapsed between `instant` and `now` in its largest whole
/// unit, e.g. `3 hours ago`. Instants after `now` count as zero seconds.
pub fn format_relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - instant).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        plural(seconds, "second")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} ago", count, unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

fn resolve_instant(input: &TimestampInput) -> Option<DateTime<Utc>> {
    match input {
        TimestampInput::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        TimestampInput::Instant(dt) => Some(*dt),
        TimestampInput::Text(text) => {
            let text = text.trim();
            let digits = text.strip_prefix('-').unwrap_or(text);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                let ms: i64 = text.parse().ok()?;
                return Utc.timestamp_millis_opt(ms).single();
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
    }
}

fn zone_label(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "UTC".to_string();
    }

    let sign = if total < 0 { '-' } else { '+' };
    let hours = total.abs() / 3600;
    let minutes = (total.abs() % 3600) / 60;
    if minutes == 0 {
        format!("GMT{}{}", sign, hours)
    } else {
        format!("GMT{}{}:{:02}", sign, hours, minutes)
    }
}
