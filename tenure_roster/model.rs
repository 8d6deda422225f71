use chrono::NaiveDate;
use derive_more::{Display, From};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tenure_core::Interval;

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {$(
        #[derive(
            Serialize, Deserialize, Display, From, Copy, Clone, Debug, PartialEq, Eq, PartialOrd,
            Ord, Hash,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);
    )*};
}

id_type!(MemberId, PostTypeId, GroupTypeId, GroupId, DecorationId);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub given_names: String,
    #[serde(default)]
    pub preferred_name: String,
    pub surname: String,
    #[serde(default)]
    pub enrolment_year: Option<i32>,
    /// Not necessarily consistent with `graduated_year`.
    #[serde(default)]
    pub graduated: bool,
    #[serde(default)]
    pub graduated_year: Option<i32>,
    #[serde(default)]
    pub allow_publish_info: bool,
    #[serde(default)]
    pub dead: bool,
}

impl Member {
    pub fn preferred_name(&self) -> &str {
        if !self.preferred_name.is_empty() {
            return &self.preferred_name;
        }
        self.given_names.split_whitespace().next().unwrap_or(&self.given_names)
    }

    /// All given names except the preferred one reduced to initials.
    pub fn given_names_with_initials(&self) -> String {
        let preferred = self.preferred_name();
        self.given_names
            .split_whitespace()
            .map(|name| if name == preferred { name.to_string() } else { initial(name) })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Surname prefixes such as "von" or "af" are ignored when sorting, so "von der Leyen"
    /// sorts under L. Everything written in lowercase is taken to be a prefix.
    pub fn surname_without_prefixes(&self) -> &str {
        let stripped = self.surname.trim_start_matches(|c: char| c.is_lowercase() || c == ' ');
        if stripped.is_empty() {
            self.surname.split_whitespace().last().unwrap_or(&self.surname)
        } else {
            stripped
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_names, self.surname)
    }

    pub fn common_name(&self) -> String {
        format!("{} {}", self.preferred_name(), self.surname)
    }

    pub fn full_name_for_sorting(&self) -> String {
        format!("{}, {}", self.surname_without_prefixes(), self.given_names)
    }

    /// Full name if contact information may be shown, initials otherwise.
    pub fn public_full_name(&self, show_contact_information: bool) -> String {
        if show_contact_information {
            self.full_name()
        } else {
            format!("{} {}", self.given_names_with_initials(), self.surname)
        }
    }

    pub fn public_full_name_for_sorting(&self, show_contact_information: bool) -> String {
        if show_contact_information {
            self.full_name_for_sorting()
        } else {
            format!("{}, {}", self.surname_without_prefixes(), self.given_names_with_initials())
        }
    }
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostType {
    pub id: PostTypeId,
    pub name: String,
}

/// A member holding a functionary post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Functionary {
    pub member: MemberId,
    pub post_type: PostTypeId,
    #[serde(flatten)]
    pub tenure: Interval,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupType {
    pub id: GroupTypeId,
    pub name: String,
}

/// One instance of a group type, e.g. a yearly board.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub group_type: GroupTypeId,
    #[serde(flatten)]
    pub tenure: Interval,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupMembership {
    pub member: MemberId,
    pub group: GroupId,
}

#[derive(Serialize, Deserialize, Display, Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    #[serde(rename = "PH")]
    #[display("Phux")]
    Phux,
    #[serde(rename = "OM")]
    #[display("Ordinarie Medlem")]
    Ordinary,
    #[serde(rename = "JS")]
    #[display("JuniorStÄlM")]
    JuniorStalm,
    #[serde(rename = "ST")]
    #[display("StÄlM")]
    Stalm,
    #[serde(rename = "FG")]
    #[display("Färdig")]
    Graduated,
    #[serde(rename = "EM")]
    #[display("Ej längre medlem")]
    Former,
    #[serde(rename = "VP")]
    #[display("Viktig person")]
    Important,
    #[serde(rename = "KA")]
    #[display("Kanslist")]
    Secretary,
    #[serde(rename = "IM")]
    #[display("Inte medlem")]
    NonMember,
    #[serde(rename = "KE")]
    #[display("Kanslist emerita")]
    SecretaryEmerita,
}

/// A period of a member's membership history. Old records may lack a begin date.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MemberType {
    pub member: MemberId,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    #[serde(default)]
    pub begin: Option<NaiveDate>,
    #[serde(default, with = "tenure_core::serde::open_end_date")]
    pub end: Option<NaiveDate>,
}

impl MemberType {
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    pub fn tenure(&self) -> Result<Option<Interval>> {
        self.begin.map(|begin| Interval::new(begin, self.end)).transpose()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub id: DecorationId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DecorationOwnership {
    pub member: MemberId,
    pub decoration: DecorationId,
    pub acquired: NaiveDate,
}
