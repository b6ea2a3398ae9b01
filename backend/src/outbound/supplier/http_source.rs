//! Reqwest-backed supplier SOAP adapter.
//!
//! Owns transport only: envelope construction, the client timeout, HTTP and
//! SOAP failure mapping, and record extraction. Each port call is exactly one
//! POST; nothing is retried here.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use roxmltree::Document;
use tracing::{debug, warn};

use super::envelope::{SoapRecord, SupplierCredentials, build_envelope, call_failure, records_in};
use super::records::{
    BRANCH_RECORD, DEPOT_RECORD, PRICE_RECORD, STOCK_SEARCH_RECORD, branch_stock, depot,
    glass_option, stock_search_item,
};
use crate::domain::ports::{SupplierStockError, SupplierStockSource, VehicleStockQuery};
use crate::domain::{
    ArgicCode, BranchStock, DepotDirectoryEntry, GlassPartOption, StockSearchItem,
};

/// Default client-side timeout for one supplier call.
pub const DEFAULT_SUPPLIER_TIMEOUT: Duration = Duration::from_secs(30);

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Connection details for the supplier endpoint.
#[derive(Debug, Clone)]
pub struct SupplierClientConfig {
    /// SOAP endpoint receiving every operation.
    pub endpoint: Url,
    /// Service namespace used in envelopes and `SOAPAction`.
    pub namespace: String,
    /// Account credentials sent in `SecureHeader`.
    pub credentials: SupplierCredentials,
    /// Client-side timeout per call.
    pub timeout: Duration,
}

/// Supplier source adapter performing SOAP 1.1 POSTs against one endpoint.
pub struct SupplierSoapSource {
    client: Client,
    endpoint: Url,
    namespace: String,
    credentials: SupplierCredentials,
}

impl SupplierSoapSource {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: SupplierClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            namespace: config.namespace,
            credentials: config.credentials,
        })
    }

    fn soap_action(&self, operation: &str) -> String {
        format!("{}/{operation}", self.namespace.trim_end_matches('/'))
    }

    async fn post(
        &self,
        operation: &'static str,
        params: &[(&str, String)],
    ) -> Result<String, SupplierStockError> {
        let envelope = build_envelope(operation, params, &self.namespace, &self.credentials);
        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", self.soap_action(operation))
            .body(envelope)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            operation,
            status = status.as_u16(),
            payload_len = body.len(),
            elapsed_ms,
            "supplier call completed"
        );
        // SOAP faults travel with HTTP 500; read the fault before giving up.
        if status == StatusCode::INTERNAL_SERVER_ERROR
            && let Some(reason) = fault_in(&body)
        {
            return Err(SupplierStockError::fault(reason));
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn fetch_records(
        &self,
        operation: &'static str,
        params: &[(&str, String)],
        (record_tag, fields): (&str, &[&str]),
    ) -> Result<Vec<SoapRecord>, SupplierStockError> {
        let body = self.post(operation, params).await?;
        decode_records(operation, &body, record_tag, fields)
    }
}

fn fault_in(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    let doc = Document::parse(text).ok()?;
    call_failure(&doc)
}

fn decode_records(
    operation: &str,
    body: &str,
    record_tag: &str,
    fields: &[&str],
) -> Result<Vec<SoapRecord>, SupplierStockError> {
    let doc = match Document::parse(body) {
        Ok(doc) => doc,
        Err(error) => {
            warn!(
                operation,
                payload_len = body.len(),
                error = %error,
                "supplier payload is not well-formed XML; treating as no records"
            );
            return Ok(Vec::new());
        }
    };
    if let Some(reason) = call_failure(&doc) {
        return Err(SupplierStockError::fault(reason));
    }
    let records = records_in(&doc, record_tag, fields);
    if records.is_empty() {
        warn!(
            operation,
            payload_len = body.len(),
            record_tag,
            "supplier returned zero records"
        );
    }
    Ok(records)
}

fn require(name: &str, value: &str) -> Result<String, SupplierStockError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SupplierStockError::invalid_request(format!(
            "{name} must not be blank"
        )));
    }
    Ok(trimmed.to_owned())
}

#[async_trait]
impl SupplierStockSource for SupplierSoapSource {
    async fn get_depots(&self) -> Result<Vec<DepotDirectoryEntry>, SupplierStockError> {
        let records = self.fetch_records("GetDepots", &[], DEPOT_RECORD).await?;
        Ok(records.iter().filter_map(depot).collect())
    }

    async fn get_branch_availability(
        &self,
        argic_code: &ArgicCode,
        qty: u32,
    ) -> Result<Vec<BranchStock>, SupplierStockError> {
        if qty == 0 {
            return Err(SupplierStockError::invalid_request("qty must be at least 1"));
        }
        let params = [
            ("argicCode", argic_code.as_str().to_owned()),
            ("qty", qty.to_string()),
        ];
        let records = self
            .fetch_records("getBranchAvailability", &params, BRANCH_RECORD)
            .await?;
        Ok(records.iter().filter_map(branch_stock).collect())
    }

    async fn stock_search_by_argic(
        &self,
        argic_code: &ArgicCode,
        depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, SupplierStockError> {
        let params = [
            ("argic", argic_code.as_str().to_owned()),
            ("location", depot.unwrap_or_default()),
        ];
        let records = self
            .fetch_records("StockSearch", &params, STOCK_SEARCH_RECORD)
            .await?;
        Ok(records.iter().filter_map(stock_search_item).collect())
    }

    async fn stock_by_vehicle(
        &self,
        query: &VehicleStockQuery,
    ) -> Result<Vec<GlassPartOption>, SupplierStockError> {
        let params = [
            ("make", require("make", &query.make)?),
            ("model", require("model", &query.model)?),
            ("modelType", query.model_type.clone().unwrap_or_default()),
            ("year", query.year.to_string()),
        ];
        let records = self
            .fetch_records("getStockList", &params, PRICE_RECORD)
            .await?;
        Ok(records.iter().filter_map(glass_option).collect())
    }
}

fn map_transport_error(error: reqwest::Error) -> SupplierStockError {
    if error.is_timeout() {
        SupplierStockError::timeout(error.to_string())
    } else {
        SupplierStockError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SupplierStockError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SupplierStockError::timeout(format!("status {}", status.as_u16()))
        }
        _ => SupplierStockError::http_status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}
