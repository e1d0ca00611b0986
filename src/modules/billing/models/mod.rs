mod billing_record;
mod change_request;

pub use billing_record::{BillingRecord, PaymentStatus};
pub use change_request::{BillingChangeRequest, BillingRecordPatch, ChangeRequestStatus};
