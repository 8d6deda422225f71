use crate::date_format::{DateFormat, DateStyle, without_year};
use chrono::{Datelike as _, NaiveDate};
use eyre::{Result, ensure};
use std::cmp::Ordering;
use std::fmt;

/// Stand-in end date for ongoing intervals in sort keys.
pub const ONGOING_SORT_DATE: &str = "9999-12-31";

/// An inclusive date range. A missing end means the interval is still ongoing.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub struct Interval {
    begin: NaiveDate,
    end: Option<NaiveDate>,
}

impl Interval {
    pub fn new(begin: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = end {
            ensure!(begin <= end, "Interval begins ({begin}) after it ends ({end})");
        }
        Ok(Self { begin, end })
    }

    pub fn closed(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(begin, Some(end))
    }

    pub fn ongoing(begin: NaiveDate) -> Self {
        Self { begin, end: None }
    }

    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && self.end.map_or(true, |end| date <= end)
    }

    /// Whether any day of the calendar year falls inside the interval.
    pub fn overlaps_year(&self, year: i32) -> bool {
        self.begin.year() <= year && self.end.map_or(true, |end| end.year() >= year)
    }

    /// A copy of this interval running until `end`. Never shortens the interval.
    pub fn extended_to(&self, end: Option<NaiveDate>) -> Self {
        let end = match (self.end, end) {
            (None, _) | (_, None) => None,
            (Some(current), Some(new)) => Some(current.max(new)),
        };
        Self { begin: self.begin, end }
    }

    /// Whether `later` starts more than one day after this interval ends.
    /// Ongoing intervals are never separated from anything after them.
    pub fn is_separated_from(&self, later: &Interval) -> bool {
        self.end.and_then(|end| end.succ_opt()).is_some_and(|after| later.begin > after)
    }

    /// Whether this interval runs past the end of `other`.
    pub fn ends_after(&self, other: &Interval) -> bool {
        match (self.end, other.end) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(a), Some(b)) => a > b,
        }
    }

    pub fn sort_key(&self) -> String {
        let end = self.end.map_or(ONGOING_SORT_DATE.to_string(), |end| end.to_string());
        format!("{end}{}", self.begin)
    }

    /// The shortest unambiguous rendering of the range.
    ///
    /// - Whole years:  1.1.YYYY - 31.12.YYYY -> `YYYY`, 1.1.YYYY - 31.12.ZZZZ -> `YYYY-ZZZZ`
    /// - Ongoing:      A.B.YYYY - ...        -> `A BB YYYY ->`
    /// - Same day:     A.B.YYYY - A.B.YYYY   -> `A BB YYYY`
    /// - Same month:   A.B.YYYY - C.B.YYYY   -> `A-C BB YYYY`
    /// - Same year:    A.B.YYYY - C.D.YYYY   -> `A BB - C DD YYYY`
    /// - Otherwise both dates in full.
    pub fn format_with(&self, fmt: &impl DateFormat) -> String {
        let begin = self.begin;
        let Some(end) = self.end else {
            return format!("{} {}", fmt.format_date(begin), fmt.ongoing_marker());
        };

        if (begin.month(), begin.day()) == (1, 1) && (end.month(), end.day()) == (12, 31) {
            return if begin.year() == end.year() {
                begin.year().to_string()
            } else {
                format!("{}-{}", begin.year(), end.year())
            };
        }

        let b = fmt.format_date(begin);
        let e = fmt.format_date(end);
        if begin.year() != end.year() {
            format!("{b} - {e}")
        } else if begin.month() != end.month() {
            format!("{} - {e}", without_year(&b))
        } else if begin.day() != end.day() {
            format!("{}-{e}", begin.day())
        } else {
            b
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&DateStyle::default()))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        // ongoing intervals end last
        let key = |i: &Interval| (i.end.is_none(), i.end, i.begin);
        key(self).cmp(&key(other))
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct IntervalRepr {
    begin: NaiveDate,
    #[serde(default, with = "crate::serde::open_end_date")]
    end: Option<NaiveDate>,
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = String;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        Interval::new(repr.begin, repr.end).map_err(|e| e.to_string())
    }
}

impl From<Interval> for IntervalRepr {
    fn from(interval: Interval) -> Self {
        IntervalRepr { begin: interval.begin, end: interval.end }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date_format::Locale;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(begin: NaiveDate, end: NaiveDate) -> Interval {
        Interval::closed(begin, end).unwrap()
    }

    #[test]
    fn same_date() {
        assert_eq!(interval(date(1998, 1, 1), date(1998, 1, 1)).to_string(), "1 January 1998");
    }

    #[test]
    fn same_month() {
        assert_eq!(interval(date(1998, 1, 1), date(1998, 1, 30)).to_string(), "1-30 January 1998");
    }

    #[test]
    fn same_year() {
        assert_eq!(
            interval(date(1998, 1, 30), date(1998, 12, 31)).to_string(),
            "30 January - 31 December 1998"
        );
    }

    #[test]
    fn whole_years() {
        assert_eq!(interval(date(1998, 1, 1), date(1998, 12, 31)).to_string(), "1998");
        assert_eq!(interval(date(1998, 1, 1), date(2000, 12, 31)).to_string(), "1998-2000");
    }

    #[test]
    fn no_simplification() {
        assert_eq!(
            interval(date(1998, 1, 1), date(2001, 7, 7)).to_string(),
            "1 January 1998 - 7 July 2001"
        );
        assert_eq!(
            interval(date(2001, 7, 7), date(2002, 12, 31)).to_string(),
            "7 July 2001 - 31 December 2002"
        );
    }

    #[test]
    fn ongoing() {
        assert_eq!(Interval::ongoing(date(2023, 1, 1)).to_string(), "1 January 2023 ->");
        let style = DateStyle { locale: Locale::Swedish, ongoing_marker: "→".to_string() };
        assert_eq!(Interval::ongoing(date(2023, 1, 1)).format_with(&style), "1 januari 2023 →");
    }

    #[test]
    fn swedish() {
        let sv = Locale::Swedish;
        assert_eq!(
            interval(date(1998, 1, 1), date(1998, 1, 30)).format_with(&sv),
            "1-30 januari 1998"
        );
        assert_eq!(
            interval(date(1998, 1, 30), date(1998, 12, 31)).format_with(&sv),
            "30 januari - 31 december 1998"
        );
        assert_eq!(
            interval(date(1998, 1, 1), date(2001, 7, 7)).format_with(&sv),
            "1 januari 1998 - 7 juli 2001"
        );
    }

    #[test]
    fn rejects_begin_after_end() {
        assert!(Interval::closed(date(2000, 2, 1), date(2000, 1, 1)).is_err());
    }

    #[test]
    fn ongoing_sorts_last() {
        let ended = interval(date(2020, 1, 1), date(2021, 12, 31));
        let running = Interval::ongoing(date(2020, 1, 1));
        let much_later = interval(date(2020, 1, 1), NaiveDate::MAX);
        assert!(ended < running);
        assert!(much_later < running);
        assert_ne!(much_later, running);
    }

    #[test]
    fn orders_by_end_then_begin() {
        let a = interval(date(2000, 1, 1), date(2000, 6, 30));
        let b = interval(date(2000, 2, 1), date(2000, 6, 30));
        let c = interval(date(1999, 1, 1), date(2000, 7, 1));
        let mut sorted = vec![c, b, a];
        sorted.sort();
        assert_eq!(sorted, vec![a, b, c]);
    }

    #[test]
    fn year_overlap() {
        let i = interval(date(1999, 9, 1), date(2001, 5, 31));
        assert!(!i.overlaps_year(1998));
        assert!(i.overlaps_year(1999));
        assert!(i.overlaps_year(2001));
        assert!(!i.overlaps_year(2002));
        assert!(Interval::ongoing(date(1999, 9, 1)).overlaps_year(2050));
    }

    #[test]
    fn sort_key_uses_sentinel_for_ongoing() {
        assert_eq!(Interval::ongoing(date(2020, 1, 1)).sort_key(), "9999-12-312020-01-01");
        assert_eq!(
            interval(date(2020, 1, 1), date(2020, 5, 1)).sort_key(),
            "2020-05-012020-01-01"
        );
    }

    #[test]
    fn deserializes_and_validates() {
        let open: Interval = serde_yml::from_str("begin: 2020-01-01").unwrap();
        assert_eq!(open, Interval::ongoing(date(2020, 1, 1)));
        let closed: Interval = serde_yml::from_str("begin: 2020-01-01\nend: 2020-02-01").unwrap();
        assert_eq!(closed.end(), Some(date(2020, 2, 1)));
        assert!(serde_yml::from_str::<Interval>("begin: 2020-03-01\nend: 2020-02-01").is_err());
    }
}
