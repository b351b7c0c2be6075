//! Lookup of the resident responsible for a unit.

use crate::common_models::resident::{EstateReference, ResidentRecord, UnitReference};
use crate::resident_directory::error::ResidentDirectoryError;

pub mod error;
pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ResidentDirectory: Send + Sync {
    /// `Ok(None)` when the estate has no such unit or nobody lives there.
    async fn resident_for_unit(
        &self,
        unit: &UnitReference,
        estate: &EstateReference,
    ) -> Result<Option<ResidentRecord>, ResidentDirectoryError>;
}
