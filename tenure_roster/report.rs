use crate::collation::collation_key;
use crate::model::{MemberId, MemberKind, PostTypeId};
use crate::registry::Registry;
use crate::sort::{DecorationRow, Direction, TenureRow, sort_by_date, sort_by_member, sort_by_name};
use chrono::Datelike as _;
use eyre::Result;
use itertools::Itertools as _;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tenure_core::{DateFormat, DateStyle, group_and_simplify};

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Holder {
    pub member: String,
    pub durations: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PostListing {
    pub name: String,
    pub holders: Vec<Holder>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupListing {
    pub name: String,
    pub durations: String,
    pub members: Vec<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DecorationListing {
    pub name: String,
    pub member: String,
    pub acquired: String,
}

/// Everyone active in the association during one calendar year.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct YearReport {
    pub year: i32,
    pub posts: Vec<PostListing>,
    pub unique_functionaries: usize,
    pub groups: Vec<GroupListing>,
    pub group_memberships_total: usize,
    pub group_memberships_unique: usize,
    pub new_ordinary_members: Vec<String>,
    pub new_stalms: Vec<String>,
    pub decorations: Vec<DecorationListing>,
}

impl YearReport {
    pub fn build(registry: &Registry, year: i32, style: &DateStyle) -> Result<YearReport> {
        let (posts, unique_functionaries) = post_listings(registry, year, style)?;
        let (groups, total, unique) = group_listings(registry, year, style)?;

        let report = YearReport {
            year,
            posts,
            unique_functionaries,
            groups,
            group_memberships_total: total,
            group_memberships_unique: unique,
            new_ordinary_members: members_beginning(registry, year, MemberKind::Ordinary)?,
            new_stalms: members_beginning(registry, year, MemberKind::Stalm)?,
            decorations: decoration_listings(registry, year, style)?,
        };
        tracing::debug!(
            year,
            posts = report.posts.len(),
            groups = report.groups.len(),
            "Built year report"
        );
        Ok(report)
    }
}

/// Functionaries active during the year. Each member's records of the same post are merged
/// over the whole registry first, so a tenure running across years is listed in full.
fn post_listings(
    registry: &Registry,
    year: i32,
    style: &DateStyle,
) -> Result<(Vec<PostListing>, usize)> {
    let merged: Vec<((PostTypeId, MemberId), _)> = group_and_simplify(
        registry.functionaries.iter().map(|f| ((f.post_type, f.member), f.tenure)),
    );

    let mut unique = HashSet::new();
    let mut rows = Vec::new();
    for ((post_type, member_id), multi) in merged {
        if !multi.is_active_in(year) {
            continue;
        }
        unique.insert(member_id);
        let post = registry.post_type(post_type)?;
        let member = registry.member(member_id)?;
        for tenure in multi.iter().filter(|t| t.overlaps_year(year)) {
            rows.push(TenureRow {
                name: post.name.clone(),
                member: registry.public_full_name(member),
                member_sort: member.full_name_for_sorting(),
                tenure: *tenure,
            });
        }
    }
    sort_by_member(&mut rows, Direction::Ascending);
    sort_by_date(&mut rows, Direction::Ascending);
    sort_by_name(&mut rows, Direction::Ascending);

    let posts = rows
        .into_iter()
        .chunk_by(|row| row.name.clone())
        .into_iter()
        .map(|(name, rows)| PostListing {
            name,
            holders: rows
                .map(|row| Holder { member: row.member, durations: row.tenure.format_with(style) })
                .collect(),
        })
        .collect();

    Ok((posts, unique.len()))
}

/// Non-empty groups active during the year, with total and distinct membership counts.
fn group_listings(
    registry: &Registry,
    year: i32,
    style: &DateStyle,
) -> Result<(Vec<GroupListing>, usize, usize)> {
    let mut total = 0;
    let mut unique = HashSet::new();
    let mut listings = Vec::new();

    for group in registry.groups.iter().filter(|g| g.tenure.overlaps_year(year)) {
        let members = registry.members_of(group.id)?;
        if members.is_empty() {
            continue;
        }
        total += members.len();
        unique.extend(members.iter().map(|m| m.id));

        let members = members
            .into_iter()
            .sorted_by_cached_key(|m| collation_key(&m.full_name_for_sorting()))
            .map(|m| registry.public_full_name(m))
            .collect();
        listings.push(GroupListing {
            name: registry.group_type(group.group_type)?.name.clone(),
            durations: group.tenure.format_with(style),
            members,
        });
    }
    listings.sort_by_cached_key(|g| collation_key(&g.name));

    Ok((listings, total, unique.len()))
}

fn members_beginning(registry: &Registry, year: i32, kind: MemberKind) -> Result<Vec<String>> {
    let members = registry
        .member_types
        .iter()
        .filter(|mt| mt.kind == kind && mt.begin.is_some_and(|begin| begin.year() == year))
        .map(|mt| registry.member(mt.member))
        .collect::<Result<Vec<_>>>()?;
    Ok(members
        .into_iter()
        .sorted_by_cached_key(|m| collation_key(&m.full_name_for_sorting()))
        .map(|m| registry.public_full_name(m))
        .collect())
}

fn decoration_listings(
    registry: &Registry,
    year: i32,
    style: &DateStyle,
) -> Result<Vec<DecorationListing>> {
    let mut rows = registry
        .decoration_ownerships
        .iter()
        .filter(|d| d.acquired.year() == year)
        .map(|d| {
            let member = registry.member(d.member)?;
            Ok(DecorationRow {
                name: registry.decoration(d.decoration)?.name.clone(),
                member: registry.public_full_name(member),
                member_sort: member.full_name_for_sorting(),
                acquired: d.acquired,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    sort_by_member(&mut rows, Direction::Ascending);
    sort_by_name(&mut rows, Direction::Ascending);

    Ok(rows
        .into_iter()
        .map(|d| DecorationListing {
            name: d.name,
            member: d.member,
            acquired: style.format_date(d.acquired),
        })
        .collect())
}

impl fmt::Display for YearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.year)?;
        writeln!(f, "Functionaries ({} unique):", self.unique_functionaries)?;
        for post in &self.posts {
            writeln!(f, "  {}:", post.name)?;
            for holder in &post.holders {
                writeln!(f, "    {} ({})", holder.member, holder.durations)?;
            }
        }
        writeln!(
            f,
            "Groups ({} memberships, {} unique):",
            self.group_memberships_total, self.group_memberships_unique
        )?;
        for group in &self.groups {
            writeln!(f, "  {} ({}): {}", group.name, group.durations, group.members.join(", "))?;
        }
        writeln!(f, "New ordinary members: {}", self.new_ordinary_members.join(", "))?;
        writeln!(f, "New stalms: {}", self.new_stalms.join(", "))?;
        writeln!(f, "Decorations:")?;
        for d in &self.decorations {
            writeln!(f, "  {}: {} ({})", d.name, d.member, d.acquired)?;
        }
        Ok(())
    }
}
