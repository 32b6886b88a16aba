// File: src/date.rs
// Purpose: `date[format,separator]` parameters and their calendar-aware patterns

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Years 1600-9999
const YEAR: &str = r"(?:1[6-9]|[2-9][0-9])[0-9]{2}";

/// Leap years 1600-9999: divisible by 4, centuries only when divisible by 400
const LEAP_YEAR: &str = r"(?:(?:1[6-9]|[2-9][0-9])(?:0[48]|[2468][048]|[13579][26])|(?:16|[2468][048]|[3579][26])00)";

static DATE_PATTERNS: Lazy<HashMap<DateFormat, Regex>> = Lazy::new(|| {
    let mut patterns = HashMap::new();
    for order in [DateOrder::DayMonthYear, DateOrder::YearMonthDay] {
        for separator in [DateSeparator::Slash, DateSeparator::Dash, DateSeparator::Dot] {
            let format = DateFormat { order, separator };
            patterns.insert(format, Regex::new(&format.pattern()).unwrap());
        }
    }
    patterns
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateOrder {
    #[serde(rename = "ddmmyyyy")]
    DayMonthYear,
    #[serde(rename = "yyyymmdd")]
    YearMonthDay,
}

impl DateOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            DateOrder::DayMonthYear => "ddmmyyyy",
            DateOrder::YearMonthDay => "yyyymmdd",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "ddmmyyyy" => Some(DateOrder::DayMonthYear),
            "yyyymmdd" => Some(DateOrder::YearMonthDay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateSeparator {
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = ".")]
    Dot,
}

impl DateSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            DateSeparator::Slash => "/",
            DateSeparator::Dash => "-",
            DateSeparator::Dot => ".",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "/" => Some(DateSeparator::Slash),
            "-" => Some(DateSeparator::Dash),
            "." => Some(DateSeparator::Dot),
            _ => None,
        }
    }
}

/// Accepted layout of a `date` rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateFormat {
    pub order: DateOrder,
    pub separator: DateSeparator,
}

impl DateFormat {
    /// Parses the `format,separator` parameter of a `date` rule
    ///
    /// # Examples
    /// ```
    /// use rusty_rules::date::{DateFormat, DateOrder, DateSeparator};
    /// let format = DateFormat::parse("ddmmyyyy,/").unwrap();
    /// assert_eq!(format.order, DateOrder::DayMonthYear);
    /// assert_eq!(format.separator, DateSeparator::Slash);
    /// assert!(DateFormat::parse("mmddyyyy,/").is_none());
    /// ```
    pub fn parse(param: &str) -> Option<Self> {
        let (order, separator) = param.split_once(',')?;
        Some(Self {
            order: DateOrder::parse(order)?,
            separator: DateSeparator::parse(separator)?,
        })
    }

    /// Human readable layout used in messages, e.g. `dd/mm/yyyy`
    pub fn layout(&self) -> String {
        let s = self.separator.as_str();
        match self.order {
            DateOrder::DayMonthYear => format!("dd{s}mm{s}yyyy"),
            DateOrder::YearMonthDay => format!("yyyy{s}mm{s}dd"),
        }
    }

    /// Whether `value` is a real calendar date in this layout
    pub fn matches(&self, value: &str) -> bool {
        DATE_PATTERNS
            .get(self)
            .map(|regex| regex.is_match(value))
            .unwrap_or(false)
    }

    fn pattern(&self) -> String {
        let s = regex::escape(self.separator.as_str());
        // 31-day months, 29/30 outside February, Feb 29 in leap years, days 1-28 anywhere
        match self.order {
            DateOrder::DayMonthYear => format!(
                "^(?:31{s}(?:0[13578]|1[02])|(?:29|30){s}(?:0[13-9]|1[0-2])){s}{YEAR}$\
                 |^29{s}02{s}{LEAP_YEAR}$\
                 |^(?:0[1-9]|1[0-9]|2[0-8]){s}(?:0[1-9]|1[0-2]){s}{YEAR}$"
            ),
            DateOrder::YearMonthDay => format!(
                "^{YEAR}{s}(?:(?:0[13578]|1[02]){s}31|(?:0[13-9]|1[0-2]){s}(?:29|30))$\
                 |^{LEAP_YEAR}{s}02{s}29$\
                 |^{YEAR}{s}(?:0[1-9]|1[0-2]){s}(?:0[1-9]|1[0-9]|2[0-8])$"
            ),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.order.as_str(), self.separator.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(param: &str) -> DateFormat {
        DateFormat::parse(param).unwrap()
    }

    #[test]
    fn test_parse_rejects_unknown_parts() {
        assert!(DateFormat::parse("ddmmyyyy").is_none());
        assert!(DateFormat::parse("ddmmyyyy,:").is_none());
        assert!(DateFormat::parse("ddmmyy,/").is_none());
        assert!(DateFormat::parse("ddmmyyyy,/,x").is_none());
    }

    #[test]
    fn test_day_month_year() {
        let f = format("ddmmyyyy,/");
        assert!(f.matches("01/01/2000"));
        assert!(f.matches("31/12/1999"));
        assert!(f.matches("30/04/2021"));
        assert!(f.matches("29/02/2020"));
        assert!(f.matches("29/02/2000"));

        assert!(!f.matches("29/02/2021"));
        assert!(!f.matches("29/02/1900"));
        assert!(!f.matches("31/04/2021"));
        assert!(!f.matches("30/02/2020"));
        assert!(!f.matches("00/01/2000"));
        assert!(!f.matches("01/13/2000"));
        assert!(!f.matches("01-01-2000"));
        assert!(!f.matches("01/01/1500"));
    }

    #[test]
    fn test_year_month_day() {
        let f = format("yyyymmdd,-");
        assert!(f.matches("2024-02-29"));
        assert!(f.matches("2023-12-31"));
        assert!(f.matches("2023-06-30"));
        assert!(!f.matches("2023-02-29"));
        assert!(!f.matches("2023-06-31"));
        assert!(!f.matches("23-12-31"));
    }

    #[test]
    fn test_dot_separator_is_literal() {
        let f = format("ddmmyyyy,.");
        assert!(f.matches("15.08.1947"));
        assert!(!f.matches("15x08x1947"));
    }

    #[test]
    fn test_layout() {
        assert_eq!(format("ddmmyyyy,/").layout(), "dd/mm/yyyy");
        assert_eq!(format("yyyymmdd,.").layout(), "yyyy.mm.dd");
        assert_eq!(format("yyyymmdd,.").to_string(), "yyyymmdd,.");
    }
}
