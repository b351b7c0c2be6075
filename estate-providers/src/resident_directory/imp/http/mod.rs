use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::common_models::resident::{EstateReference, ResidentRecord, UnitReference};
use crate::http_client::{HttpClient, Request, StatusCode};
use crate::resident_directory::{error::ResidentDirectoryError, ResidentDirectory};


pub struct Params {
    /// Resolved as `{base_url}/estates/{estate}/units/{unit}/resident`.
    pub base_url: Url,
    pub timeout: Duration,
}

pub struct HttpResidentDirectory {
    client: Arc<dyn HttpClient>,
    params: Params,
}

impl HttpResidentDirectory {
    pub fn new(client: Arc<dyn HttpClient>, params: Params) -> Self {
        Self { client, params }
    }

    fn resident_url(
        &self,
        unit: &UnitReference,
        estate: &EstateReference,
    ) -> Result<Url, ResidentDirectoryError> {
        let mut url = self.params.base_url.to_owned();
        url.path_segments_mut()
            .map_err(|_| {
                ResidentDirectoryError::InvalidRequest(format!(
                    "cannot append path to `{}`",
                    self.params.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "estates",
                estate.as_str(),
                "units",
                unit.as_str(),
                "resident",
            ]);

        Ok(url)
    }
}

#[async_trait]
impl ResidentDirectory for HttpResidentDirectory {
    async fn resident_for_unit(
        &self,
        unit: &UnitReference,
        estate: &EstateReference,
    ) -> Result<Option<ResidentRecord>, ResidentDirectoryError> {
        let request = Request::get(self.resident_url(unit, estate)?).timeout(self.params.timeout);

        let response = self
            .client
            .send(request)
            .await
            .map_err(|error| ResidentDirectoryError::Unavailable(error.to_string()))?;

        if response.status == StatusCode(404) {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|error| ResidentDirectoryError::Unavailable(error.to_string()))?;

        response
            .json()
            .map(Some)
            .map_err(|error| ResidentDirectoryError::InvalidResponse(error.to_string()))
    }
}
