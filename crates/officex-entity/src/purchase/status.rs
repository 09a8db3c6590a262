//! Purchase status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PurchaseStatus {
    /// Requested by the customer.
    #[default]
    Requested,
    /// Waiting on the vendor.
    Awaiting,
    /// Being fulfilled.
    Running,
    /// Blocked on input.
    Blocked,
    /// Delivered.
    Completed,
    /// Failed.
    Failed,
    /// Cancelled before completion.
    Canceled,
    /// Refunded after payment.
    Refunded,
    /// Hidden from active lists.
    Archived,
    /// Reported by a vendor in a state this drive does not know.
    Unknown,
}

/// Former name of [`PurchaseStatus`].
pub type JobRunStatus = PurchaseStatus;

impl PurchaseStatus {
    /// Check if the purchase is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Canceled | Self::Refunded | Self::Archived
        )
    }

    /// Return the status as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Awaiting => "AWAITING",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Refunded => "REFUNDED",
            Self::Archived => "ARCHIVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
