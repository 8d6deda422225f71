use crate::date_format::{DateFormat, DateStyle};
use crate::interval::Interval;
use chrono::NaiveDate;
use itertools::Itertools as _;
use std::fmt;

/// Merges overlapping and adjacent intervals into the minimal covering set, sorted by begin.
///
/// Two intervals are adjacent when one ends the day before the other begins.
pub fn simplify(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted = intervals.into_iter().collect_vec();
    sorted.sort_by_key(Interval::begin);

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for next in sorted {
        match merged.last_mut() {
            Some(last) if !last.is_separated_from(&next) => {
                if next.ends_after(last) {
                    // merge
                    *last = last.extended_to(next.end());
                }
            }
            // disjoint
            _ => merged.push(next),
        }
    }
    merged
}

/// The simplified intervals of a single key.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
#[serde(from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct MultiInterval {
    intervals: Vec<Interval>,
}

impl MultiInterval {
    pub fn new() -> Self {
        Self { intervals: Vec::new() }
    }

    pub fn add(&mut self, interval: Interval) {
        self.intervals.push(interval);
        self.intervals = simplify(std::mem::take(&mut self.intervals));
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn find(&self, date: NaiveDate) -> Option<Interval> {
        self.intervals.iter().find(|i| i.contains(date)).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.find(date).is_some()
    }

    pub fn is_active_in(&self, year: i32) -> bool {
        self.intervals.iter().any(|i| i.overlaps_year(year))
    }

    pub fn sort_key(&self) -> String {
        self.intervals.iter().map(Interval::sort_key).join(",")
    }

    pub fn format_with(&self, fmt: &impl DateFormat) -> String {
        self.intervals.iter().map(|i| i.format_with(fmt)).join(", ")
    }
}

impl fmt::Display for MultiInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&DateStyle::default()))
    }
}

impl PartialOrd for MultiInterval {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MultiInterval {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // element-wise, the shorter list first on a common prefix
        self.intervals.cmp(&other.intervals)
    }
}

impl From<Vec<Interval>> for MultiInterval {
    fn from(intervals: Vec<Interval>) -> Self {
        Self { intervals: simplify(intervals) }
    }
}

impl From<MultiInterval> for Vec<Interval> {
    fn from(multi: MultiInterval) -> Self {
        multi.intervals
    }
}

impl FromIterator<Interval> for MultiInterval {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self { intervals: simplify(iter) }
    }
}

impl<'a> IntoIterator for &'a MultiInterval {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn iv((y1, m1, d1): (i32, u32, u32), (y2, m2, d2): (i32, u32, u32)) -> Interval {
        Interval::closed(date(y1, m1, d1), date(y2, m2, d2)).unwrap()
    }

    fn assert_simplifies(input: [Interval; 2], expected: &[Interval]) {
        assert_eq!(simplify(input), expected);
        let [a, b] = input;
        assert_eq!(simplify([b, a]), expected);
    }

    #[test]
    fn not_overlapping() {
        let jan = iv((2000, 1, 1), (2000, 1, 30));
        let feb = iv((2000, 2, 1), (2000, 2, 28));
        assert_simplifies([jan, feb], &[jan, feb]);
    }

    #[test]
    fn sequential() {
        let jan = iv((2000, 1, 1), (2000, 1, 31));
        let feb = iv((2000, 2, 1), (2000, 2, 28));
        assert_simplifies([jan, feb], &[iv((2000, 1, 1), (2000, 2, 28))]);
    }

    #[test]
    fn overlapping() {
        let a = iv((2000, 1, 1), (2000, 2, 28));
        let b = iv((2000, 2, 1), (2000, 3, 31));
        assert_simplifies([a, b], &[iv((2000, 1, 1), (2000, 3, 31))]);
    }

    #[test]
    fn containing() {
        let outer = iv((2000, 1, 1), (2000, 3, 31));
        let inner = iv((2000, 2, 1), (2000, 2, 28));
        assert_simplifies([outer, inner], &[outer]);
    }

    #[test]
    fn empty() {
        assert_eq!(simplify([]), Vec::<Interval>::new());
        assert!(MultiInterval::from_iter([]).is_empty());
    }

    #[test]
    fn single() {
        let only = iv((2000, 1, 1), (2000, 1, 1));
        assert_eq!(simplify([only]), vec![only]);
    }

    #[test]
    fn ongoing_absorbs_later_intervals() {
        let running = Interval::ongoing(date(2000, 1, 1));
        let later = iv((2010, 1, 1), (2011, 1, 1));
        assert_eq!(simplify([later, running]), vec![running]);
    }

    #[test]
    fn ongoing_extends_adjacent_interval() {
        let ended = iv((2000, 1, 1), (2000, 12, 31));
        let running = Interval::ongoing(date(2001, 1, 1));
        assert_eq!(simplify([running, ended]), vec![Interval::ongoing(date(2000, 1, 1))]);
    }

    #[test]
    fn ongoing_after_gap_stays_separate() {
        let ended = iv((2000, 1, 1), (2000, 6, 30));
        let running = Interval::ongoing(date(2001, 1, 1));
        assert_eq!(simplify([running, ended]), vec![ended, running]);
    }

    #[test]
    fn multi_interval_display() {
        let multi: MultiInterval = [
            Interval::ongoing(date(2023, 1, 1)),
            iv((2020, 1, 1), (2021, 12, 31)),
        ]
        .into_iter()
        .collect();
        assert_eq!(multi.to_string(), "2020-2021, 1 January 2023 ->");
        assert_eq!(multi.sort_key(), "2021-12-312020-01-01,9999-12-312023-01-01");
    }

    #[test]
    fn multi_interval_add_keeps_simplified() {
        let mut multi = MultiInterval::new();
        multi.add(iv((2000, 3, 1), (2000, 3, 31)));
        multi.add(iv((2000, 1, 1), (2000, 1, 31)));
        assert_eq!(multi.len(), 2);
        multi.add(iv((2000, 2, 1), (2000, 2, 29)));
        assert_eq!(multi.intervals(), &[iv((2000, 1, 1), (2000, 3, 31))]);
        assert_eq!(multi.find(date(2000, 2, 15)), Some(iv((2000, 1, 1), (2000, 3, 31))));
        assert!(!multi.contains(date(2000, 4, 1)));
        assert!(multi.is_active_in(2000));
        assert!(!multi.is_active_in(2001));
    }

    #[test]
    fn multi_interval_ordering() {
        let a: MultiInterval = [iv((2000, 1, 1), (2000, 1, 31))].into_iter().collect();
        let b: MultiInterval = [iv((2000, 1, 1), (2000, 1, 31)), iv((2000, 5, 1), (2000, 5, 31))]
            .into_iter()
            .collect();
        let c: MultiInterval = [iv((2000, 1, 1), (2000, 2, 15))].into_iter().collect();
        assert!(a < b);
        assert!(b < c);
    }
}
