//! Administrative user-lifecycle actions.
//!
//! Each action assumes the caller has already verified that the acting
//! administrator holds the required capability; the actions enforce
//! only the target-state transition and the self-action guard.

mod archive;
mod restore;
mod suspend;

pub use archive::ArchiveUserAction;
pub use restore::RestoreUserAction;
pub use suspend::SuspendUserAction;
