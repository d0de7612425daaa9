//! Organizations, memberships, and the invite lifecycle.

pub mod actions;
mod repository;
mod types;

pub use actions::{
    AcceptInviteAction, CancelInviteAction, CreateInviteAction, CreateInviteInput,
    ExpireInvitesAction,
};
pub use repository::{
    CreateInvite, CreateOrganization, InviteRepository, MembershipRepository,
    OrganizationRepository,
};
pub use types::{Invite, InviteStatus, MemberRole, Membership, Organization};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{MockInviteRepository, MockMembershipRepository, MockOrganizationRepository};
