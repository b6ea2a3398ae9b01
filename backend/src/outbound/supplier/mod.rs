//! Glass supplier SOAP adapter.

mod envelope;
mod http_source;
mod records;

pub use envelope::{
    CALL_SUCCESS, SOAP_ENVELOPE_NS, SoapRecord, SupplierCredentials, build_envelope, call_failure,
    escape_xml, extract_records,
};
pub use http_source::{DEFAULT_SUPPLIER_TIMEOUT, SupplierClientConfig, SupplierSoapSource};
