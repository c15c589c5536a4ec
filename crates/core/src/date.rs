//! Calendar dates (no time-of-day).
//!
//! Dates typed by users and dates sent by the backend come in a few shapes
//! (`2024-01-31`, `2024.1.31`, `2024-01-31T09:12:00`). All of them reduce to a
//! [`NaiveDate`]; anything else is a validation failure.

use chrono::NaiveDate;

use crate::error::{DomainError, DomainResult};

/// Parse a calendar date.
///
/// The time component (anything after `T` or a space) is ignored. The date part
/// is read as the first three digit groups: year, month, day.
pub fn parse_calendar_date(raw: &str) -> DomainResult<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or_default();

    let parts: Vec<&str> = date_part
        .split(|c: char| !c.is_ascii_digit())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() < 3 {
        return Err(DomainError::validation(format!(
            "not a calendar date: {trimmed:?}"
        )));
    }

    let year = parse_part::<i32>(parts[0], trimmed)?;
    let month = parse_part::<u32>(parts[1], trimmed)?;
    let day = parse_part::<u32>(parts[2], trimmed)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DomainError::validation(format!("no such calendar date: {trimmed:?}"))
    })
}

fn parse_part<T: core::str::FromStr>(part: &str, raw: &str) -> DomainResult<T> {
    part.parse::<T>()
        .map_err(|_| DomainError::validation(format!("not a calendar date: {raw:?}")))
}

/// `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde adapter that accepts any shape understood by [`parse_calendar_date`]
/// and always writes `YYYY-MM-DD`.
pub mod lenient {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_str(&super::super::format_calendar_date(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => super::super::parse_calendar_date(s)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_calendar_date("2024-01-31").unwrap(), ymd(2024, 1, 31));
    }

    #[test]
    fn ignores_time_of_day() {
        assert_eq!(
            parse_calendar_date("2024-05-22T18:30:00.123456").unwrap(),
            ymd(2024, 5, 22)
        );
        assert_eq!(parse_calendar_date("2024-05-22 18:30").unwrap(), ymd(2024, 5, 22));
    }

    #[test]
    fn accepts_other_separators_and_unpadded_parts() {
        assert_eq!(parse_calendar_date("2024.1.5").unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_calendar_date("2024/12/09").unwrap(), ymd(2024, 12, 9));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for raw in ["", "tomorrow", "2024-02", "2023-02-29", "2024-13-01"] {
            let err = parse_calendar_date(raw).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn lenient_serde_reads_datetimes() {
        #[derive(serde::Deserialize, serde::Serialize)]
        struct Wrapper {
            #[serde(with = "lenient")]
            day: NaiveDate,
        }

        let w: Wrapper = serde_json::from_str(r#"{"day":"2024-03-01T00:00:00"}"#).unwrap();
        assert_eq!(w.day, ymd(2024, 3, 1));
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"day":"2024-03-01"}"#);
    }

    proptest! {
        #[test]
        fn any_separator_yields_the_same_date(
            days in 0i64..200_000,
            sep in prop::sample::select(vec!["-", ".", "/"]),
        ) {
            let date = ymd(1970, 1, 1) + chrono::Days::new(days as u64);
            let raw = date.format(&format!("%Y{sep}%m{sep}%d")).to_string();
            prop_assert_eq!(parse_calendar_date(&raw).unwrap(), date);
        }
    }
}
