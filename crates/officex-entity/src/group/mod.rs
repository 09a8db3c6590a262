//! Groups and group invites.

pub mod invite;
pub mod model;

pub use invite::{GroupInvite, GroupInviteFE, GroupRole};
pub use model::{Group, GroupFE, GroupMemberPreview};
