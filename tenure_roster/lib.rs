//! The association's records and the views built from them: member profiles and yearly
//! activity reports, both rendering tenures through `tenure_core`.

pub mod collation;
pub mod model;
pub mod profile;
pub mod registry;
pub mod report;
pub mod sort;

pub use model::{
    Decoration, DecorationId, DecorationOwnership, Functionary, Group, GroupId, GroupMembership,
    GroupType, GroupTypeId, Member, MemberId, MemberKind, MemberType, PostType, PostTypeId,
};
pub use profile::Profile;
pub use registry::Registry;
pub use report::YearReport;
