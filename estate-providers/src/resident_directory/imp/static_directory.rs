use std::collections::HashMap;

use async_trait::async_trait;

use crate::common_models::resident::{EstateReference, ResidentRecord, UnitReference};
use crate::resident_directory::{error::ResidentDirectoryError, ResidentDirectory};

#[derive(Default)]
pub struct StaticResidentDirectory {
    units: HashMap<(EstateReference, UnitReference), ResidentRecord>,
}

impl StaticResidentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resident(
        mut self,
        estate: EstateReference,
        unit: UnitReference,
        resident: ResidentRecord,
    ) -> Self {
        self.units.insert((estate, unit), resident);
        self
    }
}

#[async_trait]
impl ResidentDirectory for StaticResidentDirectory {
    async fn resident_for_unit(
        &self,
        unit: &UnitReference,
        estate: &EstateReference,
    ) -> Result<Option<ResidentRecord>, ResidentDirectoryError> {
        Ok(self
            .units
            .get(&(estate.to_owned(), unit.to_owned()))
            .cloned())
    }
}
