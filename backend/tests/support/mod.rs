//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! one pulls this module in with `mod support;`. The main helper is
//! [`FakeUpstream`], a real Actix server bound to an ephemeral port that
//! stands in for the supplier SOAP endpoint or the registration lookup API.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod embedded_postgres;

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

/// One request received by a [`FakeUpstream`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// First header value with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First query parameter value with the given name.
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Response returned by a [`FakeUpstream`] responder.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Option<Duration>,
}

impl CannedResponse {
    pub fn xml(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/xml; charset=utf-8",
            body: body.into(),
            delay: None,
        }
    }

    pub fn json(body: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync;

#[derive(Clone)]
struct FakeState {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn record_and_respond(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<FakeState>,
) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_owned(),
        query: req.query_string().to_owned(),
        headers: req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let canned = (state.responder)(&recorded);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(recorded);
    if let Some(delay) = canned.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    let status = actix_web::http::StatusCode::from_u16(canned.status).expect("valid status");
    HttpResponse::build(status)
        .content_type(canned.content_type)
        .body(canned.body)
}

/// Upstream double serving every path through one responder.
pub struct FakeUpstream {
    base_url: String,
    handle: ServerHandle,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    /// Bind to `127.0.0.1:0` and start serving. Must be called inside an
    /// Actix runtime (for example from `#[actix_web::test]`).
    pub fn start(
        responder: impl Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake upstream");
        let addr = listener.local_addr().expect("fake upstream address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            responder: Arc::new(responder),
            requests: requests.clone(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .default_service(web::to(record_and_respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen fake upstream")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            handle,
            requests,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> url::Url {
        url::Url::parse(&format!("{}{path}", self.base_url)).expect("fake upstream url")
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Stop the server without waiting for in-flight requests.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Wrap operation-specific body XML in a SOAP 1.1 response envelope.
pub fn soap_response(inner: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            "<soap:Body>{}</soap:Body></soap:Envelope>"
        ),
        inner
    )
}
