use std::collections::HashMap;

use async_trait::async_trait;

use crate::common_models::resident::EstateReference;
use crate::pin_validation::{
    error::PinValidationError,
    model::{PinValidation, ValidatedGuest},
    PinValidator,
};

/// Fixed table of issued PINs, keyed per estate.
#[derive(Default)]
pub struct StaticPinValidator {
    pins: HashMap<(EstateReference, String), Option<ValidatedGuest>>,
}

impl StaticPinValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pin(
        mut self,
        estate: EstateReference,
        pin: &str,
        guest: Option<ValidatedGuest>,
    ) -> Self {
        self.pins.insert((estate, pin.to_owned()), guest);
        self
    }
}

#[async_trait]
impl PinValidator for StaticPinValidator {
    async fn validate(
        &self,
        pin: &str,
        estate: &EstateReference,
    ) -> Result<PinValidation, PinValidationError> {
        Ok(match self.pins.get(&(estate.to_owned(), pin.to_owned())) {
            Some(guest_info) => PinValidation {
                valid: true,
                guest_info: guest_info.to_owned(),
            },
            None => PinValidation::rejected(),
        })
    }
}
