// A billing record captures one wash: the customer, the car, the bundle of
// service snapshots sold, and who handled it. The total is derived from the
// snapshots at creation time and is only ever recomputed when the snapshot
// list itself changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::change_request::BillingChangeRequest;
use crate::core::{money, AppError, Result};
use crate::modules::catalog::Service;

/// Payment status lifecycle of a billing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Recorded but not yet settled
    Pending,

    /// Settled in full; only paid records enter reports
    Paid,

    /// Voided; excluded from all aggregates
    Cancelled,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "CANCELLED" => Ok(PaymentStatus::Cancelled),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// One billable wash event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Unique record ID (UUID)
    pub id: String,

    /// Customer display name
    pub customer_name: String,

    /// Free-text car description ("Red Toyota Corolla")
    pub car_details: String,

    /// Service snapshots frozen at billing time, never re-resolved
    pub services: Vec<Service>,

    /// Sum of snapshot prices, rounded to cents
    pub total_amount: Decimal,

    /// Current payment status
    pub payment_status: PaymentStatus,

    /// When the wash was recorded
    pub timestamp: DateTime<Utc>,

    /// ID of the staff member who handled the wash
    pub staff_id: String,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// Pending change request, if any (workflow handled externally)
    pub change_request: Option<BillingChangeRequest>,
}

impl BillingRecord {
    /// Create a new billing record with validation
    ///
    /// # Arguments
    /// * `customer_name` - Customer display name (must not be empty)
    /// * `car_details` - Car description (must not be empty)
    /// * `services` - Service snapshots sold (must not be empty)
    /// * `staff_id` - Handling staff member's ID
    ///
    /// # Returns
    /// * `Result<Self>` - Validated record with calculated total, status `Pending`
    pub fn new(
        customer_name: impl Into<String>,
        car_details: impl Into<String>,
        services: Vec<Service>,
        staff_id: impl Into<String>,
    ) -> Result<Self> {
        let customer_name = customer_name.into();
        let car_details = car_details.into();

        Self::validate_customer_name(&customer_name)?;
        Self::validate_car_details(&car_details)?;
        Self::validate_services(&services)?;

        let total_amount = Self::total_of(&services);

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            customer_name,
            car_details,
            services,
            total_amount,
            payment_status: PaymentStatus::Pending,
            timestamp: Utc::now(),
            staff_id: staff_id.into(),
            notes: None,
            change_request: None,
        })
    }

    /// Set the payment status (builder style)
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = status;
        self
    }

    /// Attach free-text notes (builder style)
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Override the record timestamp (builder style, for back-dated entries)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Replace the snapshot list and recompute the total
    ///
    /// The total always equals the sum of the current snapshot prices; this is
    /// the only way it changes after construction.
    pub fn set_services(&mut self, services: Vec<Service>) -> Result<()> {
        Self::validate_services(&services)?;

        self.services = services;
        self.total_amount = Self::total_of(&self.services);
        Ok(())
    }

    /// Sum of snapshot prices, rounded to cents
    fn total_of(services: &[Service]) -> Decimal {
        money::round(services.iter().map(|s| s.price).sum())
    }

    fn validate_customer_name(customer_name: &str) -> Result<()> {
        if customer_name.trim().is_empty() {
            return Err(AppError::validation("Customer name cannot be empty"));
        }

        Ok(())
    }

    fn validate_car_details(car_details: &str) -> Result<()> {
        if car_details.trim().is_empty() {
            return Err(AppError::validation("Car details cannot be empty"));
        }

        Ok(())
    }

    fn validate_services(services: &[Service]) -> Result<()> {
        if services.is_empty() {
            return Err(AppError::validation(
                "Billing record must have at least one service",
            ));
        }

        Ok(())
    }
}
