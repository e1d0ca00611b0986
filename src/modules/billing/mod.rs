// Billing module

pub mod models;

pub use models::{
    BillingChangeRequest, BillingRecord, BillingRecordPatch, ChangeRequestStatus, PaymentStatus,
};
