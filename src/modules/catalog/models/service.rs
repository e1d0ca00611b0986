// A service is both a live catalog entry and, once attached to a billing
// record, a frozen snapshot of what was sold. Snapshots are owned clones
// taken at billing time and are never re-resolved against the catalog,
// so later price edits cannot rewrite history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, AppError, Result};

/// A washable service or package offered by the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique service ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Price in USD, at most two decimal places
    pub price: Decimal,

    /// Short customer-facing description
    pub description: String,
}

impl Service {
    /// Create a new catalog entry with validation
    ///
    /// # Arguments
    /// * `name` - Display name (must not be empty)
    /// * `price` - USD price (non-negative, at most two decimals)
    /// * `description` - Customer-facing description (must not be empty)
    ///
    /// # Returns
    /// * `Result<Self>` - Validated service or error
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();

        Self::validate_name(&name)?;
        Self::validate_description(&description)?;
        money::validate_amount(price).map_err(AppError::validation)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            price: money::round(price),
            description,
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Service name cannot be empty"));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().is_empty() {
            return Err(AppError::validation("Service description cannot be empty"));
        }

        Ok(())
    }
}
