use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::common_models::resident::EstateReference;
use crate::http_client::{self, HttpClient, Request};
use crate::pin_validation::{error::PinValidationError, model::PinValidation, PinValidator};


pub struct Params {
    /// Endpoint accepting `POST {"pin", "estateReference"}`.
    pub validate_url: Url,
    pub timeout: Duration,
}

pub struct HttpPinValidator {
    client: Arc<dyn HttpClient>,
    params: Params,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    pin: &'a str,
    estate_reference: &'a str,
}

impl HttpPinValidator {
    pub fn new(client: Arc<dyn HttpClient>, params: Params) -> Self {
        Self { client, params }
    }
}

#[async_trait]
impl PinValidator for HttpPinValidator {
    async fn validate(
        &self,
        pin: &str,
        estate: &EstateReference,
    ) -> Result<PinValidation, PinValidationError> {
        let request = Request::post_json(
            self.params.validate_url.to_owned(),
            &ValidateRequest {
                pin,
                estate_reference: estate.as_str(),
            },
        )
        .map_err(|error| PinValidationError::InvalidRequest(error.to_string()))?
        .timeout(self.params.timeout);

        let response = self
            .client
            .send(request)
            .await
            .and_then(http_client::Response::error_for_status)
            .map_err(|error| PinValidationError::Unavailable(error.to_string()))?;

        response
            .json()
            .map_err(|error| PinValidationError::InvalidResponse(error.to_string()))
    }
}
