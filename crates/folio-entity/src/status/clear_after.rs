//! "Clear after" policy for a status.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use folio_core::AppError;

/// When a status should stop being shown.
///
/// On the wire this is the string `"never"`, `"today"`, `"week"` or a
/// plain JSON number of minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClearAfter {
    /// The status stays until replaced or cleared.
    #[default]
    Never,
    /// The status expires after this many minutes.
    Minutes(u32),
    /// The status expires at the end of the current local day.
    Today,
    /// The status expires at the end of the coming Sunday.
    Week,
}

impl ClearAfter {
    /// Options offered to the admin, in display order.
    pub const OPTIONS: [ClearAfter; 6] = [
        Self::Never,
        Self::Minutes(30),
        Self::Minutes(60),
        Self::Minutes(240),
        Self::Today,
        Self::Week,
    ];

    /// Human-readable label.
    pub fn label(&self) -> String {
        match self {
            Self::Never => "Never".to_string(),
            Self::Today => "Today".to_string(),
            Self::Week => "This week".to_string(),
            Self::Minutes(m) if *m >= 60 && m % 60 == 0 => {
                let hours = m / 60;
                if hours == 1 {
                    "In 1 hour".to_string()
                } else {
                    format!("In {hours} hours")
                }
            }
            Self::Minutes(m) => format!("In {m} minutes"),
        }
    }
}

impl fmt::Display for ClearAfter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::Today => f.write_str("today"),
            Self::Week => f.write_str("week"),
            Self::Minutes(m) => write!(f, "{m}"),
        }
    }
}

impl FromStr for ClearAfter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            other => match other.parse::<u32>() {
                Ok(m) if m > 0 => Ok(Self::Minutes(m)),
                _ => Err(AppError::validation(format!(
                    "Invalid clear-after value: '{s}'. Expected never, today, week or a number of minutes"
                ))),
            },
        }
    }
}

impl Serialize for ClearAfter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Minutes(m) => serializer.serialize_u32(*m),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ClearAfter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClearAfterVisitor;

        impl Visitor<'_> for ClearAfterVisitor {
            type Value = ClearAfter;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"never\", \"today\", \"week\" or a number of minutes")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ClearAfter, E> {
                u32::try_from(v)
                    .map(ClearAfter::Minutes)
                    .map_err(|_| E::custom("minutes out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ClearAfter, E> {
                u32::try_from(v)
                    .map(ClearAfter::Minutes)
                    .map_err(|_| E::custom("minutes out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ClearAfter, E> {
                v.parse().map_err(|e: AppError| E::custom(e.message))
            }
        }

        deserializer.deserialize_any(ClearAfterVisitor)
    }
}
