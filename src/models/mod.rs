//! Data models for the CMDB console.
//!
//! These models match the camelCase shape the console speaks; the gateway translates
//! them to and from the snake_case wire format of the CMDB API.

mod assignment;
mod datacenter;
mod host;
mod ip_address;
mod operating_system;
mod person;
mod server;

pub use assignment::*;
pub use datacenter::*;
pub use host::*;
pub use ip_address::*;
pub use operating_system::*;
pub use person::*;
pub use server::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::Record;

/// A CMDB record type served by one collection of the API.
pub trait Entity: Record + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this entity lives in.
    const RESOURCE: Resource;

    /// Create/update payload.
    type Input: Validate + Serialize + DeserializeOwned + Send + Sync;

    /// Human-readable name used when another record links to this one.
    fn display_name(&self) -> &str;
}

/// Client-side checks run before a payload is sent upstream.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Reject blank required text fields.
pub(crate) fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject numbers below a lower bound.
pub(crate) fn at_least(field: &str, value: i64, min: i64) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {}, got {}",
            field, min, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_whitespace() {
        assert!(require("Name", "  ").is_err());
        assert!(require("Name", "DC-East-01").is_ok());
    }

    #[test]
    fn test_at_least() {
        let err = at_least("CPU", 0, 1).unwrap_err();
        assert_eq!(err.message(), "CPU must be at least 1, got 0");
        assert!(at_least("CPU", 1, 1).is_ok());
    }
}
