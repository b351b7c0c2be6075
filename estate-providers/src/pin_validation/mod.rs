//! Validation of pre-arranged visitor PINs against the estate's external PIN
//! service. The service is authoritative for the identity of PIN visitors.

use crate::common_models::resident::EstateReference;
use crate::pin_validation::error::PinValidationError;
use crate::pin_validation::model::PinValidation;

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait PinValidator: Send + Sync {
    /// A rejected PIN is `Ok` with `valid == false`; `Err` means the service
    /// could not give an answer.
    async fn validate(
        &self,
        pin: &str,
        estate: &EstateReference,
    ) -> Result<PinValidation, PinValidationError>;
}
