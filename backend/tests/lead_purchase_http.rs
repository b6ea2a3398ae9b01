//! Lead purchase endpoint over the in-memory lead store.
//!
//! Drives `POST /api/v1/leads/purchase` through the real service and store so
//! idempotency, the purchaser limit and the credit arithmetic are observed
//! from the HTTP surface.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

use glasstrade::Trace;
use glasstrade::domain::{LeadPricing, LeadPurchaseService, PAID_LEAD_STATUS};
use glasstrade::inbound::http::configure_api;
use glasstrade::inbound::http::state::HttpState;
use glasstrade::outbound::memory::InMemoryLeadStore;

const PURCHASE_PATH: &str = "/api/v1/leads/purchase";

#[fixture]
fn store() -> InMemoryLeadStore {
    InMemoryLeadStore::new()
}

fn state_over(store: &InMemoryLeadStore) -> HttpState {
    HttpState::fixtures().with_lead_purchase(Arc::new(LeadPurchaseService::new(Arc::new(
        store.clone(),
    ))))
}

fn quoted_lead(lead_id: Uuid, quote_minor: i64) -> LeadPricing {
    LeadPricing {
        lead_id,
        status: PAID_LEAD_STATUS.to_owned(),
        quote_price: Some(Decimal::new(quote_minor, 2)),
    }
}

fn purchase_body(lead_id: Uuid, technician_id: Uuid) -> Value {
    json!({
        "jobId": lead_id.to_string(),
        "technicianId": technician_id.to_string(),
        "technicianName": "Sam Glazier",
    })
}

macro_rules! purchase {
    ($app:expr, $body:expr) => {{
        let request = test::TestRequest::post()
            .uri(PURCHASE_PATH)
            .set_json($body)
            .to_request();
        let response = test::call_service(&$app, request).await;
        let status = response.status();
        let has_trace_id = response.headers().contains_key("trace-id");
        let body: Value = test::read_body_json(response).await;
        (status, has_trace_id, body)
    }};
}

#[rstest]
#[actix_web::test]
async fn quoted_lead_debits_ten_percent_once(store: InMemoryLeadStore) {
    let lead_id = Uuid::new_v4();
    let technician_id = Uuid::new_v4();
    store.insert_lead(quoted_lead(lead_id, 29_999)).await;
    store.insert_technician(technician_id, 100).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(&store)))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await;

    let (status, has_trace_id, body) = purchase!(app, purchase_body(lead_id, technician_id));
    assert_eq!(status, StatusCode::OK);
    assert!(has_trace_id);
    assert_eq!(body["success"], true);
    assert_eq!(body["creditsDeducted"], 30);
    assert!(body["assignmentId"].as_str().is_some_and(|id| Uuid::parse_str(id).is_ok()));

    let (status, _, body) = purchase!(app, purchase_body(lead_id, technician_id));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["error"], "already purchased");
    assert_eq!(body["details"]["reason"], "already_purchased");
    assert!(body["traceId"].is_string());

    assert_eq!(store.credits(&technician_id).await, Some(70));
}

#[rstest]
#[actix_web::test]
async fn fourth_purchaser_finds_the_lead_sold_out(store: InMemoryLeadStore) {
    let lead_id = Uuid::new_v4();
    store
        .insert_lead(LeadPricing {
            lead_id,
            status: "new".to_owned(),
            quote_price: None,
        })
        .await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(&store)))
            .configure(configure_api),
    )
    .await;

    for _ in 0..3 {
        let (status, _, body) = purchase!(app, purchase_body(lead_id, Uuid::new_v4()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["creditsDeducted"], 0);
    }

    let (status, _, body) = purchase!(app, purchase_body(lead_id, Uuid::new_v4()));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "sold out");
    assert_eq!(body["details"]["reason"], "sold_out");
}

#[rstest]
#[actix_web::test]
async fn insufficient_credits_leave_no_assignment_behind(store: InMemoryLeadStore) {
    let lead_id = Uuid::new_v4();
    let technician_id = Uuid::new_v4();
    store.insert_lead(quoted_lead(lead_id, 29_999)).await;
    store.insert_technician(technician_id, 29).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(&store)))
            .configure(configure_api),
    )
    .await;

    let (status, _, body) = purchase!(app, purchase_body(lead_id, technician_id));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], "insufficient credits");
    assert_eq!(body["details"]["reason"], "insufficient_credits");
    assert_eq!(store.credits(&technician_id).await, Some(29));

    // The refused attempt was compensated, so a topped-up retry is not a
    // duplicate.
    store.insert_technician(technician_id, 45).await;
    let (status, _, body) = purchase!(app, purchase_body(lead_id, technician_id));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creditsDeducted"], 30);
    assert_eq!(store.credits(&technician_id).await, Some(15));
}

#[rstest]
#[case::missing_job(json!({ "technicianId": Uuid::nil().to_string(), "technicianName": "A" }), "jobId", "missing_field")]
#[case::blank_name(json!({ "jobId": Uuid::nil().to_string(), "technicianId": Uuid::nil().to_string(), "technicianName": "  " }), "technicianName", "missing_field")]
#[case::bad_uuid(json!({ "jobId": "job-1", "technicianId": Uuid::nil().to_string(), "technicianName": "A" }), "jobId", "invalid_uuid")]
#[actix_web::test]
async fn malformed_bodies_are_rejected_before_the_store(
    store: InMemoryLeadStore,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(&store)))
            .configure(configure_api),
    )
    .await;

    let (status, _, body) = purchase!(app, body);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}
