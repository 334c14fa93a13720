//! Date notations.
//!
//! Formats are given in the Qt style used by the input files: `ddMMyyyy`,
//! `dd MMM yyyy`, or `dd<sep>MM<sep>yyyy` with one of `. - * + : ; \ /`.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::{TextError, TextResult};

const SEPARATORS: [char; 8] = ['.', '-', '*', '+', ':', ';', '\\', '/'];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `ddMMyyyy`
    Compact,
    /// `dd MMM yyyy`, English month abbreviations
    MonthName,
    /// `dd<sep>MM<sep>yyyy`
    Separated(char),
}

impl FromStr for DateFormat {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ddMMyyyy" => return Ok(DateFormat::Compact),
            "dd MMM yyyy" => return Ok(DateFormat::MonthName),
            _ => {}
        }
        SEPARATORS
            .iter()
            .find(|&&sep| s == format!("dd{sep}MM{sep}yyyy"))
            .map(|&sep| DateFormat::Separated(sep))
            .ok_or_else(|| TextError::UnsupportedDateFormat {
                format: s.to_string(),
            })
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let upper = name.to_ascii_uppercase();
    if upper == "JLY" {
        return Some(7);
    }
    MONTHS
        .iter()
        .position(|&m| m == upper)
        .map(|i| i as u32 + 1)
}

impl DateFormat {
    pub fn parse(&self, text: &str) -> TextResult<NaiveDate> {
        let s = text.trim();
        let invalid = || TextError::InvalidDate {
            text: text.to_string(),
        };
        let num = |part: Option<&str>| -> TextResult<u32> {
            part.and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)
        };
        let (day, month, year) = match self {
            DateFormat::Compact => {
                if !s.is_ascii() || s.len() < 5 {
                    return Err(invalid());
                }
                (num(s.get(0..2))?, num(s.get(2..4))?, num(s.get(4..))?)
            }
            DateFormat::MonthName => {
                let mut parts = s.split_whitespace();
                let day = num(parts.next())?;
                let month = parts.next().and_then(month_from_name).ok_or_else(invalid)?;
                (day, month, num(parts.next())?)
            }
            DateFormat::Separated(sep) => {
                let mut parts = s.split(*sep);
                let d = num(parts.next())?;
                let m = num(parts.next())?;
                let y = num(parts.next())?;
                if parts.next().is_some() {
                    return Err(invalid());
                }
                (d, m, y)
            }
        };
        let year = i32::try_from(year).map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

/// Parse `text` with a format given as string.
pub fn parse_date(text: &str, format: &str) -> TextResult<NaiveDate> {
    format.parse::<DateFormat>()?.parse(text)
}

/// `dd.mm.yyyy`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn supported_formats() {
        assert_eq!(parse_date("05032021", "ddMMyyyy").unwrap(), ymd(2021, 3, 5));
        assert_eq!(parse_date("05 MAR 2021", "dd MMM yyyy").unwrap(), ymd(2021, 3, 5));
        assert_eq!(parse_date("1 jly 1999", "dd MMM yyyy").unwrap(), ymd(1999, 7, 1));
        assert_eq!(parse_date("31.12.2020", "dd.MM.yyyy").unwrap(), ymd(2020, 12, 31));
        assert_eq!(parse_date("01/02/2020", "dd/MM/yyyy").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("01\\02\\2020", "dd\\MM\\yyyy").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("1-2-2020", "dd-MM-yyyy").unwrap(), ymd(2020, 2, 1));
    }

    #[test]
    fn unsupported_format() {
        for f in ["yyyy-MM-dd", "dd_MM_yyyy", "", "MM.dd.yyyy"] {
            assert!(
                matches!(parse_date("2020-01-01", f), Err(TextError::UnsupportedDateFormat { .. })),
                "{f}"
            );
        }
    }

    #[test]
    fn invalid_dates() {
        for (text, f) in [
            ("30.02.2021", "dd.MM.yyyy"),
            ("1.1", "dd.MM.yyyy"),
            ("01 XYZ 2020", "dd MMM yyyy"),
            ("0101", "ddMMyyyy"),
            ("aa.bb.cccc", "dd.MM.yyyy"),
        ] {
            assert!(matches!(parse_date(text, f), Err(TextError::InvalidDate { .. })), "{text}");
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_date(ymd(2020, 1, 5)), "05.01.2020");
        let d = ymd(1987, 11, 23);
        assert_eq!(parse_date(&format_date(d), "dd.MM.yyyy").unwrap(), d);
    }
}
