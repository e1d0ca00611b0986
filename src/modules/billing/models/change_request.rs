// Change-request data attached to billing records. The submit/approve/reject
// workflow and its notifications live outside this crate; reporting only sees
// the final approved state of each record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::billing_record::PaymentStatus;

/// Review status of a change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeRequestStatus {
    /// Awaiting owner review
    Pending,

    /// Applied to the record
    Approved,

    /// Declined, record unchanged
    Rejected,
}

impl Default for ChangeRequestStatus {
    fn default() -> Self {
        ChangeRequestStatus::Pending
    }
}

impl std::fmt::Display for ChangeRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeRequestStatus::Pending => write!(f, "PENDING"),
            ChangeRequestStatus::Approved => write!(f, "APPROVED"),
            ChangeRequestStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Field-level edits a staff member may request on a billing record
///
/// There is deliberately no field for the service snapshots or the total:
/// replaying an approved change can touch descriptive fields and the payment
/// status, but never the historical prices frozen at billing time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingRecordPatch {
    pub customer_name: Option<String>,
    pub car_details: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<String>,
}

impl BillingRecordPatch {
    /// True when the patch requests no changes at all
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.car_details.is_none()
            && self.payment_status.is_none()
            && self.notes.is_none()
    }
}

/// A staff request to amend a billing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingChangeRequest {
    /// ID of the requesting staff member
    pub requested_by: String,

    /// Free-text justification shown to the owner
    pub reason: String,

    /// The requested field edits
    pub requested_changes: BillingRecordPatch,

    /// Current review status
    pub status: ChangeRequestStatus,

    /// When the request was submitted
    pub timestamp: DateTime<Utc>,
}

impl BillingChangeRequest {
    /// Create a new pending change request
    pub fn new(
        requested_by: impl Into<String>,
        reason: impl Into<String>,
        requested_changes: BillingRecordPatch,
    ) -> Self {
        Self {
            requested_by: requested_by.into(),
            reason: reason.into(),
            requested_changes,
            status: ChangeRequestStatus::Pending,
            timestamp: Utc::now(),
        }
    }
}
