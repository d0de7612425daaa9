use chrono::{DateTime, Utc};

/// Events emitted by warden lifecycle actions.
///
/// Events are always fired from actions. If no listeners are
/// registered, they are silently ignored (no-op). Register listeners
/// via [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AccessEvent {
    // invite lifecycle
    InviteCreated {
        invite_id: i64,
        organization_id: i64,
        email: String,
        at: DateTime<Utc>,
    },
    InviteAccepted {
        invite_id: i64,
        organization_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    },
    InviteCancelled {
        invite_id: i64,
        organization_id: i64,
        by: i64,
        at: DateTime<Utc>,
    },

    // user lifecycle
    UserArchived {
        user_id: i64,
        by: i64,
        at: DateTime<Utc>,
    },
    UserRestored {
        user_id: i64,
        by: i64,
        at: DateTime<Utc>,
    },
    UserSuspended {
        user_id: i64,
        by: i64,
        sessions_revoked: u64,
        at: DateTime<Utc>,
    },
}

impl AccessEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InviteCreated { .. } => "invite.created",
            Self::InviteAccepted { .. } => "invite.accepted",
            Self::InviteCancelled { .. } => "invite.cancelled",
            Self::UserArchived { .. } => "user.archived",
            Self::UserRestored { .. } => "user.restored",
            Self::UserSuspended { .. } => "user.suspended",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::InviteCreated { at, .. }
            | Self::InviteAccepted { at, .. }
            | Self::InviteCancelled { at, .. }
            | Self::UserArchived { at, .. }
            | Self::UserRestored { at, .. }
            | Self::UserSuspended { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AccessEvent::InviteCreated {
                invite_id: 1,
                organization_id: 1,
                email: "test@example.com".to_owned(),
                at: now,
            }
            .name(),
            "invite.created"
        );

        assert_eq!(
            AccessEvent::UserSuspended {
                user_id: 1,
                by: 2,
                sessions_revoked: 3,
                at: now,
            }
            .name(),
            "user.suspended"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = AccessEvent::UserArchived {
            user_id: 1,
            by: 2,
            at: now,
        };
        assert_eq!(event.timestamp(), now);
    }
}
