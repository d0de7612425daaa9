//! Administrative invite-lifecycle actions.

mod accept_invite;
mod cancel_invite;
mod create_invite;
mod expire_invites;

pub use accept_invite::AcceptInviteAction;
pub use cancel_invite::CancelInviteAction;
pub use create_invite::{CreateInviteAction, CreateInviteInput};
pub use expire_invites::ExpireInvitesAction;
