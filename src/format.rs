//! Relative Time Formatting
//!
//! Renders timestamps as "há 5 minutos" / "5 minutes ago". The formatter is
//! built once from configuration and shared read-only afterwards.
//!
//! # Thresholds
//!
//! | Elapsed            | Output (en)      |
//! |--------------------|------------------|
//! | ≤ 44 seconds       | a few seconds    |
//! | ≤ 89 seconds       | a minute         |
//! | ≤ 44 minutes       | N minutes        |
//! | ≤ 89 minutes       | an hour          |
//! | ≤ 21 hours         | N hours          |
//! | ≤ 35 hours         | a day            |
//! | ≤ 25 days          | N days           |
//! | ≤ 45 days          | a month          |
//! | ≤ 10 months        | N months         |
//! | ≤ 17 months        | a year           |
//! | otherwise          | N years          |

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DAYS_PER_MONTH: f64 = 30.4375;

/// Display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese
    #[default]
    PtBr,
    /// English
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale name not recognised
#[derive(Debug, Error)]
#[error("Unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Bucketed elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Seconds,
    Minute,
    Minutes(i64),
    Hour,
    Hours(i64),
    Day,
    Days(i64),
    Month,
    Months(i64),
    Year,
    Years(i64),
}

impl Span {
    fn from_seconds(elapsed: f64) -> Self {
        let seconds = elapsed.abs().round();
        if seconds <= 44.0 {
            return Span::Seconds;
        }
        if seconds <= 89.0 {
            return Span::Minute;
        }

        let minutes = (elapsed.abs() / 60.0).round();
        if minutes <= 44.0 {
            return Span::Minutes(minutes as i64);
        }
        if minutes <= 89.0 {
            return Span::Hour;
        }

        let hours = (elapsed.abs() / 3600.0).round();
        if hours <= 21.0 {
            return Span::Hours(hours as i64);
        }
        if hours <= 35.0 {
            return Span::Day;
        }

        let days = (elapsed.abs() / 86_400.0).round();
        if days <= 25.0 {
            return Span::Days(days as i64);
        }
        if days <= 45.0 {
            return Span::Month;
        }

        let months = (elapsed.abs() / 86_400.0 / DAYS_PER_MONTH).round();
        if months <= 10.0 {
            return Span::Months(months as i64);
        }
        if months <= 17.0 {
            return Span::Year;
        }

        Span::Years((months / 12.0).round() as i64)
    }

    fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::PtBr => match self {
                Span::Seconds => "poucos segundos".to_string(),
                Span::Minute => "um minuto".to_string(),
                Span::Minutes(n) => format!("{} minutos", n),
                Span::Hour => "uma hora".to_string(),
                Span::Hours(n) => format!("{} horas", n),
                Span::Day => "um dia".to_string(),
                Span::Days(n) => format!("{} dias", n),
                Span::Month => "um mês".to_string(),
                Span::Months(n) => format!("{} meses", n),
                Span::Year => "um ano".to_string(),
                Span::Years(n) => format!("{} anos", n),
            },
            Locale::En => match self {
                Span::Seconds => "a few seconds".to_string(),
                Span::Minute => "a minute".to_string(),
                Span::Minutes(n) => format!("{} minutes", n),
                Span::Hour => "an hour".to_string(),
                Span::Hours(n) => format!("{} hours", n),
                Span::Day => "a day".to_string(),
                Span::Days(n) => format!("{} days", n),
                Span::Month => "a month".to_string(),
                Span::Months(n) => format!("{} months", n),
                Span::Year => "a year".to_string(),
                Span::Years(n) => format!("{} years", n),
            },
        }
    }
}

/// Immutable relative-time formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeTimeFormatter {
    locale: Locale,
}

impl RelativeTimeFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Time elapsed from `time` until now, e.g. "há 2 horas"
    pub fn from_now(&self, time: DateTime<Utc>) -> String {
        self.relative_to(time, Utc::now())
    }

    /// Time from now until `time`, e.g. "em 2 horas" for a past timestamp
    pub fn to_now(&self, time: DateTime<Utc>) -> String {
        self.relative_to(Utc::now(), time)
    }

    /// Describe `time` relative to `reference`
    ///
    /// Times at or before the reference read as past, later ones as future.
    pub fn relative_to(&self, time: DateTime<Utc>, reference: DateTime<Utc>) -> String {
        let elapsed_ms = (reference - time).num_milliseconds();
        let span = Span::from_seconds(elapsed_ms as f64 / 1000.0).render(self.locale);

        match (self.locale, elapsed_ms >= 0) {
            (Locale::PtBr, true) => format!("há {}", span),
            (Locale::PtBr, false) => format!("em {}", span),
            (Locale::En, true) => format!("{} ago", span),
            (Locale::En, false) => format!("in {}", span),
        }
    }
}
