use chrono::{Datelike as _, NaiveDate};

/// Renders a single date as "day month year" with a localized month name.
pub trait DateFormat {
    fn format_date(&self, date: NaiveDate) -> String;

    /// Appended after the begin date of an interval without an end.
    fn ongoing_marker(&self) -> &str {
        "->"
    }
}

#[derive(
    serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Swedish,
}

impl Locale {
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::English => &ENGLISH_MONTHS,
            Locale::Swedish => &SWEDISH_MONTHS,
        };
        names[(month as usize).clamp(1, 12) - 1]
    }
}

impl DateFormat for Locale {
    fn format_date(&self, date: NaiveDate) -> String {
        format!("{} {} {}", date.day(), self.month_name(date.month()), date.year())
    }
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SWEDISH_MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "mars",
    "april",
    "maj",
    "juni",
    "juli",
    "augusti",
    "september",
    "oktober",
    "november",
    "december",
];

/// A locale together with the marker used for ongoing intervals.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DateStyle {
    pub locale: Locale,
    pub ongoing_marker: String,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self { locale: Locale::default(), ongoing_marker: "->".to_string() }
    }
}

impl DateStyle {
    pub fn new(locale: Locale) -> Self {
        Self { locale, ..Default::default() }
    }
}

impl DateFormat for DateStyle {
    fn format_date(&self, date: NaiveDate) -> String {
        self.locale.format_date(date)
    }

    fn ongoing_marker(&self) -> &str {
        &self.ongoing_marker
    }
}

/// The "day month" part of a formatted date, i.e. everything before the last space.
pub fn without_year(formatted: &str) -> &str {
    formatted.rsplit_once(' ').map_or(formatted, |(day_month, _year)| day_month)
}
