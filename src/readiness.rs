//! Readiness gate over engine connectivity and user presence
//!
//! Two independent status streams decide whether the adapter may send
//! commands at all: the engine connection state and the local user's
//! presence. [`ReadinessTracker`] folds the latest pair into a binary
//! [`Readiness`] value, recomputed after every status change. Readiness
//! is a pure function of that pair; replaying the same update twice never
//! produces a second transition.

use tracing::info;

use crate::engine::{ConnStatus, UserStatus};

/// Adapter readiness, derived from the latest connectivity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Engine unreachable or user signed out; all requests are rejected
    Undefined,
    /// Engine online and user session usable; requests go through
    Ready,
}

/// Folds connectivity and presence updates into a readiness gate.
///
/// Ready requires the engine connection to be `Online` and the local
/// presence to be anything but `Offline`. Both start at `Offline`, so a
/// fresh tracker is `Undefined` until the engine says otherwise.
#[derive(Debug)]
pub struct ReadinessTracker {
    connection: ConnStatus,
    presence: UserStatus,
    readiness: Readiness,
}

impl ReadinessTracker {
    pub fn new() -> Self {
        Self {
            connection: ConnStatus::Offline,
            presence: UserStatus::Offline,
            readiness: Readiness::Undefined,
        }
    }

    /// Record a new engine connection state.
    ///
    /// Returns `true` when the readiness gate transitioned as a result.
    pub fn update_connection(&mut self, status: ConnStatus) -> bool {
        self.connection = status;
        self.recompute()
    }

    /// Record a new local presence state.
    ///
    /// Returns `true` when the readiness gate transitioned as a result.
    pub fn update_presence(&mut self, status: UserStatus) -> bool {
        self.presence = status;
        self.recompute()
    }

    /// Current readiness.
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    fn recompute(&mut self) -> bool {
        let next = if self.connection == ConnStatus::Online
            && self.presence != UserStatus::Offline
        {
            Readiness::Ready
        } else {
            Readiness::Undefined
        };

        if next == self.readiness {
            return false;
        }

        info!(
            "readiness {:?} -> {:?} (connection {:?}, presence {:?})",
            self.readiness, next, self.connection, self.presence
        );
        self.readiness = next;
        true
    }
}

impl Default for ReadinessTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_undefined() {
        let tracker = ReadinessTracker::new();
        assert_eq!(tracker.readiness(), Readiness::Undefined);
        assert!(!tracker.is_ready());
    }

    #[test]
    fn ready_requires_online_connection_and_signed_in_user() {
        let mut tracker = ReadinessTracker::new();
        assert!(!tracker.update_presence(UserStatus::Online));
        assert!(!tracker.update_connection(ConnStatus::Connecting));
        assert!(tracker.update_connection(ConnStatus::Online));
        assert!(tracker.is_ready());
    }

    #[test]
    fn every_non_offline_presence_counts_as_usable() {
        for presence in [
            UserStatus::Online,
            UserStatus::Away,
            UserStatus::DoNotDisturb,
            UserStatus::Invisible,
            UserStatus::NotAvailable,
        ] {
            let mut tracker = ReadinessTracker::new();
            tracker.update_connection(ConnStatus::Online);
            assert!(
                tracker.update_presence(presence),
                "presence {:?} should make the tracker ready",
                presence
            );
            assert!(tracker.is_ready());
        }
    }

    #[test]
    fn repeating_an_update_is_a_no_op() {
        let mut tracker = ReadinessTracker::new();
        tracker.update_connection(ConnStatus::Online);
        assert!(tracker.update_presence(UserStatus::Online));
        assert!(!tracker.update_presence(UserStatus::Online));
        assert!(!tracker.update_connection(ConnStatus::Online));
        assert!(tracker.is_ready());
    }

    #[test]
    fn losing_the_connection_forces_undefined() {
        let mut tracker = ReadinessTracker::new();
        tracker.update_connection(ConnStatus::Online);
        tracker.update_presence(UserStatus::Online);
        assert!(tracker.update_connection(ConnStatus::Connecting));
        assert_eq!(tracker.readiness(), Readiness::Undefined);
    }

    #[test]
    fn user_going_offline_forces_undefined() {
        let mut tracker = ReadinessTracker::new();
        tracker.update_connection(ConnStatus::Online);
        tracker.update_presence(UserStatus::Away);
        assert!(tracker.update_presence(UserStatus::Offline));
        assert!(!tracker.is_ready());
    }

    #[test]
    fn presence_changes_between_usable_states_do_not_transition() {
        let mut tracker = ReadinessTracker::new();
        tracker.update_connection(ConnStatus::Online);
        tracker.update_presence(UserStatus::Online);
        assert!(!tracker.update_presence(UserStatus::DoNotDisturb));
        assert!(tracker.is_ready());
    }
}
