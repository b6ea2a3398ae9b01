//! Reqwest-backed registration lookup adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::LookupEnvelopeDto;
use crate::domain::Vrn;
use crate::domain::ports::{VehicleLookup, VehicleLookupError, VehicleLookupOutcome};

/// Default client-side timeout for one lookup.
pub const DEFAULT_VEHICLE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

const API_VERSION: &str = "2";

/// Vehicle lookup adapter calling the registration REST endpoint.
pub struct VehicleLookupHttpSource {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl VehicleLookupHttpSource {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn lookup_url(&self, vrn: &Vrn) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("v", API_VERSION)
            .append_pair("api_nullitems", "1")
            .append_pair("auth_apikey", &self.api_key)
            .append_pair("key_vrm", vrn.as_str());
        url
    }
}

#[async_trait]
impl VehicleLookup for VehicleLookupHttpSource {
    async fn resolve(&self, vrn: &Vrn) -> Result<VehicleLookupOutcome, VehicleLookupError> {
        let response = self
            .client
            .get(self.lookup_url(vrn))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(VehicleLookupOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(VehicleLookupError::transport(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let decoded: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| VehicleLookupError::decode(format!("invalid lookup JSON: {err}")))?;
        let summary = serde_json::from_value::<LookupEnvelopeDto>(decoded)
            .ok()
            .and_then(|dto| dto.into_summary(vrn));

        debug!(
            vrn = %vrn,
            found = summary.is_some(),
            payload_len = body.len(),
            "vehicle lookup completed"
        );
        Ok(summary.map_or(VehicleLookupOutcome::NotFound, VehicleLookupOutcome::Found))
    }
}

fn map_transport_error(error: reqwest::Error) -> VehicleLookupError {
    if error.is_timeout() {
        VehicleLookupError::timeout(error.to_string())
    } else {
        VehicleLookupError::transport(error.to_string())
    }
}
