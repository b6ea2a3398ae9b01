//! Glass supplier integration and lead purchasing backend.
//!
//! Hexagonal layout: [`domain`] holds types, services and ports;
//! [`outbound`] adapts the supplier SOAP API, the registration lookup API
//! and the lead store; [`inbound`] exposes the services over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
