//! Calendar-date handling shared by records and query parameters.
//!
//! Every record carries a plain `YYYY-MM-DD` date in the user's local
//! calendar. No timezone conversion happens anywhere in the service.

use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

use crate::error::AppError;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Today's calendar date in UTC, used when a client omits the date.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn parse_date(text: &str) -> Result<Date, AppError> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|_| AppError::bad_request(format!("invalid date '{text}', expected YYYY-MM-DD")))
}

/// Resolves an optional query parameter, falling back to today.
pub fn date_or_today(param: Option<&str>) -> Result<Date, AppError> {
    match param {
        Some(text) if !text.trim().is_empty() => parse_date(text),
        _ => Ok(today()),
    }
}

pub mod iso_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(DATE_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(text.trim(), DATE_FORMAT).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::{de, Deserialize, Deserializer, Serializer};
        use time::Date;

        use super::super::DATE_FORMAT;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) if !text.trim().is_empty() => Date::parse(text.trim(), DATE_FORMAT)
                    .map(Some)
                    .map_err(de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
