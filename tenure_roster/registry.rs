use crate::model::{
    Decoration, DecorationId, DecorationOwnership, Functionary, Group, GroupId, GroupMembership,
    GroupType, GroupTypeId, Member, MemberId, MemberKind, MemberType, PostType, PostTypeId,
};
use eyre::{OptionExt as _, Result, WrapErr as _, ensure};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tenure_core::OptionExt as _;

/// All records of the association, as loaded from a YAML document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Registry {
    pub members: Vec<Member>,
    pub post_types: Vec<PostType>,
    pub functionaries: Vec<Functionary>,
    pub group_types: Vec<GroupType>,
    pub groups: Vec<Group>,
    pub group_memberships: Vec<GroupMembership>,
    pub member_types: Vec<MemberType>,
    pub decorations: Vec<Decoration>,
    pub decoration_ownerships: Vec<DecorationOwnership>,
}

impl Registry {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let registry: Registry = serde_yml::from_str(s).wrap_err("Invalid registry document")?;
        registry.validate()?;
        tracing::debug!(
            members = registry.members.len(),
            functionaries = registry.functionaries.len(),
            groups = registry.groups.len(),
            "Loaded registry"
        );
        Ok(registry)
    }

    /// Checks that every reference resolves, ids are unique and membership types are well formed.
    pub fn validate(&self) -> Result<()> {
        unique("member", self.members.iter().map(|m| m.id))?;
        unique("post type", self.post_types.iter().map(|p| p.id))?;
        unique("group type", self.group_types.iter().map(|g| g.id))?;
        unique("group", self.groups.iter().map(|g| g.id))?;
        unique("decoration", self.decorations.iter().map(|d| d.id))?;

        for f in &self.functionaries {
            self.member(f.member)?;
            self.post_type(f.post_type)?;
        }
        for g in &self.groups {
            self.group_type(g.group_type)?;
        }
        let mut seen = HashSet::new();
        for gm in &self.group_memberships {
            self.member(gm.member)?;
            self.group(gm.group)?;
            ensure!(
                seen.insert((gm.member, gm.group)),
                "Member {} is listed twice in group {}",
                gm.member,
                gm.group
            );
        }
        for mt in &self.member_types {
            self.member(mt.member)?;
            mt.tenure().wrap_err_with(|| format!("Invalid member type of member {}", mt.member))?;
        }
        for d in &self.decoration_ownerships {
            self.member(d.member)?;
            self.decoration(d.decoration)?;
        }
        Ok(())
    }

    pub fn member(&self, id: MemberId) -> Result<&Member> {
        self.members.iter().find(|m| m.id == id).ok_or_eyre(format!("No member with id {id}"))
    }

    /// Looks a member up by numeric id, or else by full name ignoring case.
    pub fn find_member(&self, query: &str) -> Result<&Member> {
        if let Ok(id) = query.parse() {
            return self.member(MemberId(id));
        }
        let name = query.trim().to_lowercase();
        self.members
            .iter()
            .find(|m| m.full_name().to_lowercase() == name)
            .some()
            .wrap_err_with(|| format!("No member named {query:?}"))
    }

    pub fn post_type(&self, id: PostTypeId) -> Result<&PostType> {
        self.post_types.iter().find(|p| p.id == id).ok_or_eyre(format!("No post type with id {id}"))
    }

    pub fn group_type(&self, id: GroupTypeId) -> Result<&GroupType> {
        self.group_types
            .iter()
            .find(|g| g.id == id)
            .ok_or_eyre(format!("No group type with id {id}"))
    }

    pub fn group(&self, id: GroupId) -> Result<&Group> {
        self.groups.iter().find(|g| g.id == id).ok_or_eyre(format!("No group with id {id}"))
    }

    pub fn decoration(&self, id: DecorationId) -> Result<&Decoration> {
        self.decorations
            .iter()
            .find(|d| d.id == id)
            .ok_or_eyre(format!("No decoration with id {id}"))
    }

    pub fn functionaries_of(&self, member: MemberId) -> impl Iterator<Item = &Functionary> {
        self.functionaries.iter().filter(move |f| f.member == member)
    }

    pub fn groups_of(&self, member: MemberId) -> Result<Vec<&Group>> {
        self.group_memberships
            .iter()
            .filter(|gm| gm.member == member)
            .map(|gm| self.group(gm.group))
            .collect()
    }

    pub fn members_of(&self, group: GroupId) -> Result<Vec<&Member>> {
        self.group_memberships
            .iter()
            .filter(|gm| gm.group == group)
            .map(|gm| self.member(gm.member))
            .collect()
    }

    pub fn member_types_of(&self, member: MemberId) -> impl Iterator<Item = &MemberType> {
        self.member_types.iter().filter(move |mt| mt.member == member)
    }

    pub fn decorations_of(&self, member: MemberId) -> impl Iterator<Item = &DecorationOwnership> {
        self.decoration_ownerships.iter().filter(move |d| d.member == member)
    }

    /// An ongoing ordinary membership, otherwise an ongoing stalm membership.
    pub fn current_member_type(&self, member: MemberId) -> Option<&MemberType> {
        [MemberKind::Ordinary, MemberKind::Stalm].into_iter().find_map(|kind| {
            self.member_types_of(member).find(|mt| mt.kind == kind).filter(|mt| mt.is_ongoing())
        })
    }

    pub fn is_valid_member(&self, member: MemberId) -> bool {
        self.current_member_type(member).is_some()
    }

    /// A junior stalm who is no longer a valid member is due to become a stalm.
    pub fn should_be_stalm(&self, member: MemberId) -> bool {
        !self.is_valid_member(member)
            && self.member_types_of(member).any(|mt| mt.kind == MemberKind::JuniorStalm)
    }

    pub fn phux_year(&self, member: MemberId) -> Option<i32> {
        use chrono::Datelike as _;
        self.member_types_of(member)
            .find(|mt| mt.kind == MemberKind::Phux)
            .and_then(|mt| mt.begin)
            .map(|begin| begin.year())
    }

    pub fn show_contact_information(&self, member: &Member) -> bool {
        member.allow_publish_info && self.is_valid_member(member.id) && !member.dead
    }

    pub fn public_full_name(&self, member: &Member) -> String {
        member.public_full_name(self.show_contact_information(member))
    }
}

fn unique<T: std::fmt::Display>(what: &str, ids: impl Iterator<Item = T>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        ensure!(seen.insert(id.to_string()), "Duplicate {what} id {id}");
    }
    Ok(())
}
