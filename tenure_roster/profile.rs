use crate::collation::collation_key;
use crate::model::MemberId;
use crate::registry::Registry;
use crate::sort::{DecorationRow, Direction, sort_by_date, sort_by_name};
use eyre::Result;
use itertools::Itertools as _;
use serde::Serialize;
use std::fmt;
use tenure_core::{DateFormat, DateStyle, Interval, format_grouped_with, group_and_simplify};

/// A post, group or membership type with all of the member's merged tenures in it.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TenureLine {
    pub name: String,
    pub durations: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DecorationLine {
    pub name: String,
    pub acquired: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub member_type: Option<String>,
    pub phux_year: Option<i32>,
    pub posts: Vec<TenureLine>,
    pub groups: Vec<TenureLine>,
    pub member_types: Vec<TenureLine>,
    pub decorations: Vec<DecorationLine>,
}

impl Profile {
    pub fn build(registry: &Registry, member_id: MemberId, style: &DateStyle) -> Result<Profile> {
        let member = registry.member(member_id)?;

        let posts = registry
            .functionaries_of(member_id)
            .map(|f| Ok((registry.post_type(f.post_type)?.name.clone(), f.tenure)))
            .collect::<Result<Vec<_>>>()?;

        let groups = registry
            .groups_of(member_id)?
            .into_iter()
            .map(|g| Ok((registry.group_type(g.group_type)?.name.clone(), g.tenure)))
            .collect::<Result<Vec<_>>>()?;

        let mut member_types = Vec::new();
        for mt in registry.member_types_of(member_id) {
            if let Some(tenure) = mt.tenure()? {
                member_types.push((mt.kind, tenure));
            }
        }
        // membership history reads chronologically rather than alphabetically
        let member_types = group_and_simplify(member_types)
            .into_iter()
            .sorted_by_key(|(_, multi)| multi.intervals().first().map(Interval::begin))
            .map(|(kind, multi)| TenureLine {
                name: kind.to_string(),
                durations: multi.format_with(style),
            })
            .collect();

        let mut decorations = registry
            .decorations_of(member_id)
            .map(|d| {
                Ok(DecorationRow {
                    name: registry.decoration(d.decoration)?.name.clone(),
                    member: member.full_name(),
                    member_sort: member.full_name_for_sorting(),
                    acquired: d.acquired,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        sort_by_name(&mut decorations, Direction::Ascending);
        sort_by_date(&mut decorations, Direction::Descending);

        tracing::debug!(%member_id, "Built profile");

        Ok(Profile {
            name: registry.public_full_name(member),
            member_type: registry.current_member_type(member_id).map(|mt| mt.kind.to_string()),
            phux_year: registry.phux_year(member_id),
            posts: tenure_lines(posts, style),
            groups: tenure_lines(groups, style),
            member_types,
            decorations: decorations
                .into_iter()
                .map(|d| DecorationLine { name: d.name, acquired: style.format_date(d.acquired) })
                .collect(),
        })
    }
}

fn tenure_lines(items: Vec<(String, Interval)>, style: &DateStyle) -> Vec<TenureLine> {
    format_grouped_with(items, style)
        .into_iter()
        .map(|(name, durations)| TenureLine { name, durations })
        .sorted_by_cached_key(|line| collation_key(&line.name))
        .collect()
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if let Some(member_type) = &self.member_type {
            writeln!(f, "Member type: {member_type}")?;
        }
        if let Some(year) = self.phux_year {
            writeln!(f, "Phux year: {year}")?;
        }
        for (title, lines) in
            [("Posts", &self.posts), ("Groups", &self.groups), ("Membership", &self.member_types)]
        {
            if lines.is_empty() {
                continue;
            }
            writeln!(f, "{title}:")?;
            for line in lines {
                writeln!(f, "  {}: {}", line.name, line.durations)?;
            }
        }
        if !self.decorations.is_empty() {
            writeln!(f, "Decorations:")?;
            for d in &self.decorations {
                writeln!(f, "  {}: {}", d.name, d.acquired)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registry::test::fixture;
    use tenure_core::Locale;

    fn line(name: &str, durations: &str) -> TenureLine {
        TenureLine { name: name.to_string(), durations: durations.to_string() }
    }

    fn decoration(name: &str, acquired: &str) -> DecorationLine {
        DecorationLine { name: name.to_string(), acquired: acquired.to_string() }
    }

    #[test]
    fn merges_contiguous_posts() {
        let profile = Profile::build(&fixture(), MemberId(1), &DateStyle::default()).unwrap();
        assert_eq!(profile.name, "Anna Maria af Ärnström");
        assert_eq!(profile.member_type.as_deref(), Some("Ordinarie Medlem"));
        assert_eq!(profile.phux_year, Some(2018));
        assert_eq!(
            profile.posts,
            [
                line("Kassör", "1 January - 30 June 2022, 1 January 2023 ->"),
                line("Ordförande", "2019-2020"),
            ]
        );
        assert_eq!(
            profile.groups,
            [line("Arbetsgrupp", "1-31 March 2020"), line("Styrelsen", "2020-2021")]
        );
        assert_eq!(
            profile.member_types,
            [
                line("Phux", "1 September - 30 November 2018"),
                line("Ordinarie Medlem", "1 December 2018 ->"),
            ]
        );
    }

    #[test]
    fn decorations_most_recent_first() {
        let style = DateStyle::new(Locale::Swedish);
        let profile = Profile::build(&fixture(), MemberId(1), &style).unwrap();
        assert_eq!(
            profile.decorations,
            [
                decoration("Hedersmedlem", "1 november 2023"),
                decoration("Förtjänsttecken", "1 november 2020"),
            ]
        );
    }

    #[test]
    fn renders_text() {
        let profile = Profile::build(&fixture(), MemberId(2), &DateStyle::default()).unwrap();
        let text = profile.to_string();
        assert!(text.starts_with("B Erik Berg\nPhux year: 2019\n"), "{text}");
        assert!(text.contains("Posts:\n  Kassör: 1 January - 30 June 2020\n"), "{text}");
        assert!(text.contains("  JuniorStÄlM: 1 December 2019 - 30 April 2020\n"), "{text}");
    }

    #[test]
    fn unknown_member() {
        assert!(Profile::build(&fixture(), MemberId(42), &DateStyle::default()).is_err());
    }
}
