use crate::collation::collation_key;
use chrono::NaiveDate;
use std::cmp::Reverse;
use tenure_core::Interval;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// A listing row that can be ordered by date, by its own name or by the member's name.
pub trait Listed {
    type Date: Ord;

    fn date(&self) -> Self::Date;
    fn name(&self) -> &str;
    /// The member's name in sorting form, e.g. "Surname, Given Names".
    fn member(&self) -> &str;
}

/// A member's tenure of a post or in a group.
#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TenureRow {
    pub name: String,
    pub member: String,
    #[serde(skip)]
    pub member_sort: String,
    pub tenure: Interval,
}

impl Listed for TenureRow {
    type Date = Interval;

    fn date(&self) -> Interval {
        self.tenure
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn member(&self) -> &str {
        &self.member_sort
    }
}

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DecorationRow {
    pub name: String,
    pub member: String,
    #[serde(skip)]
    pub member_sort: String,
    pub acquired: NaiveDate,
}

impl Listed for DecorationRow {
    type Date = NaiveDate;

    fn date(&self) -> NaiveDate {
        self.acquired
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn member(&self) -> &str {
        &self.member_sort
    }
}

// All sorts are stable so they can be chained, least significant key first.

/// Orders by end date then begin date; ongoing tenures count as the most recent.
pub fn sort_by_date<T: Listed>(rows: &mut [T], direction: Direction) {
    sort_with(rows, direction, |row| row.date());
}

pub fn sort_by_name<T: Listed>(rows: &mut [T], direction: Direction) {
    sort_with(rows, direction, |row| collation_key(row.name()));
}

pub fn sort_by_member<T: Listed>(rows: &mut [T], direction: Direction) {
    sort_with(rows, direction, |row| collation_key(row.member()));
}

fn sort_with<T, K: Ord>(rows: &mut [T], direction: Direction, key: impl Fn(&T) -> K) {
    match direction {
        Direction::Ascending => rows.sort_by_cached_key(|row| key(row)),
        Direction::Descending => rows.sort_by_cached_key(|row| Reverse(key(row))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type Ymd = (i32, u32, u32);

    fn row(name: &str, member: &str, begin: Ymd, end: Option<Ymd>) -> TenureRow {
        let date = |(y, m, d): Ymd| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        TenureRow {
            name: name.to_string(),
            member: member.to_string(),
            member_sort: member.to_string(),
            tenure: Interval::new(date(begin), end.map(date)).unwrap(),
        }
    }

    fn names(rows: &[TenureRow]) -> Vec<(&str, &str)> {
        rows.iter().map(|r| (r.name.as_str(), r.member.as_str())).collect()
    }

    #[test]
    fn chained_sorts() {
        let mut rows = vec![
            row("Ordförande", "Öberg", (2020, 1, 1), Some((2020, 12, 31))),
            row("Kassör", "Berg", (2020, 1, 1), Some((2020, 6, 30))),
            row("Kassör", "Andersson", (2020, 7, 1), Some((2020, 12, 31))),
            row("Ordförande", "Andersson", (2020, 1, 1), Some((2020, 12, 31))),
        ];
        sort_by_member(&mut rows, Direction::Ascending);
        sort_by_date(&mut rows, Direction::Ascending);
        sort_by_name(&mut rows, Direction::Ascending);
        assert_eq!(
            names(&rows),
            [
                ("Kassör", "Berg"),
                ("Kassör", "Andersson"),
                ("Ordförande", "Andersson"),
                ("Ordförande", "Öberg"),
            ]
        );
    }

    #[test]
    fn most_recent_first() {
        let mut rows = vec![
            row("A", "x", (2018, 1, 1), Some((2018, 12, 31))),
            row("B", "x", (2015, 1, 1), None),
            row("C", "x", (2019, 1, 1), Some((2019, 12, 31))),
        ];
        sort_by_date(&mut rows, Direction::Descending);
        assert_eq!(rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["B", "C", "A"]);
    }

    #[test]
    fn descending_is_stable() {
        let mut rows = vec![
            row("A", "first", (2018, 1, 1), None),
            row("A", "second", (2019, 1, 1), None),
        ];
        sort_by_name(&mut rows, Direction::Descending);
        assert_eq!(names(&rows), [("A", "first"), ("A", "second")]);
    }
}
