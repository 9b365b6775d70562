//! Localized date formatting

use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::error::DateError;

/// Formats API timestamps for display in a fixed locale and timezone
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
    timezone: Tz,
    pattern: String,
}

impl DateFormatter {
    /// Create a formatter
    ///
    /// `language` accepts both `pt-BR` and `pt_BR` spellings. An empty
    /// `timezone` means UTC. `pattern` is a chrono strftime pattern whose
    /// month and weekday names are rendered in `language`.
    pub fn new(language: &str, timezone: &str, pattern: &str) -> Result<Self, DateError> {
        let locale_name = language.replace('-', "_");
        let locale = Locale::try_from(locale_name.as_str())
            .map_err(|_| DateError::Locale(language.to_string()))?;

        let timezone = if timezone.trim().is_empty() {
            Tz::UTC
        } else {
            timezone
                .parse::<Tz>()
                .map_err(|_| DateError::Timezone(timezone.to_string()))?
        };

        Ok(Self {
            locale,
            timezone,
            pattern: pattern.to_string(),
        })
    }

    /// Create a formatter from the site's language, timezone and date format
    pub fn from_config(config: &SiteConfig) -> Result<Self, DateError> {
        Self::new(&config.language, &config.timezone, &config.date_format)
    }

    /// Format a timestamp, e.g. `2021-03-25T00:00:00Z` -> `25 de março de 2021`
    pub fn format(&self, timestamp: &str) -> Result<String, DateError> {
        let date = parse_timestamp(timestamp)?.with_timezone(&self.timezone);
        Ok(date.format_localized(&self.pattern, self.locale).to_string())
    }
}

/// Parse the timestamp layouts the content API produces
///
/// Accepts RFC 3339, the `+0000` offset style Prismic uses, and bare
/// `YYYY-MM-DD` dates (read as midnight UTC).
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, DateError> {
    let s = timestamp.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Ok(date.with_timezone(&Utc));
    }

    for layout in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(date) = DateTime::parse_from_str(s, layout) {
            return Ok(date.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(|| DateError::Parse(timestamp.to_string()))
}
