//! Registration lookup adapter against a fake lookup API.

mod support;

use std::time::Duration;

use glasstrade::domain::Vrn;
use glasstrade::domain::ports::{VehicleLookup, VehicleLookupError, VehicleLookupOutcome};
use glasstrade::outbound::vehicle::VehicleLookupHttpSource;
use rstest::rstest;
use serde_json::json;
use support::{CannedResponse, FakeUpstream};

fn source(upstream: &FakeUpstream, timeout: Duration) -> VehicleLookupHttpSource {
    VehicleLookupHttpSource::new(upstream.url("/r2/lookup"), "test-key", timeout)
        .expect("lookup client")
}

fn vrn(raw: &str) -> Vrn {
    Vrn::parse(raw).expect("valid registration")
}

#[rstest]
#[actix_web::test]
async fn found_vehicle_is_decoded_and_query_carries_key() {
    let upstream = FakeUpstream::start(|_| {
        CannedResponse::json(&json!({
            "Response": {
                "StatusCode": "Success",
                "DataItems": {
                    "VehicleRegistration": {
                        "Make": "FORD",
                        "Model": "FOCUS ZETEC",
                        "YearOfManufacture": "2011",
                        "BodyStyle": "HATCHBACK"
                    }
                }
            }
        }))
    });
    let lookup = source(&upstream, Duration::from_secs(5));

    let outcome = lookup.resolve(&vrn("hn11 eyw")).await.expect("lookup");

    let VehicleLookupOutcome::Found(summary) = outcome else {
        panic!("expected a vehicle, got {outcome:?}");
    };
    assert_eq!(summary.registration, "HN11EYW");
    assert_eq!(summary.make.as_deref(), Some("FORD"));
    assert_eq!(summary.year_of_manufacture, Some(2011));
    assert_eq!(summary.body_style.as_deref(), Some("HATCHBACK"));

    let requests = upstream.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/r2/lookup");
    assert_eq!(request.query_param("v").as_deref(), Some("2"));
    assert_eq!(request.query_param("api_nullitems").as_deref(), Some("1"));
    assert_eq!(request.query_param("auth_apikey").as_deref(), Some("test-key"));
    assert_eq!(request.query_param("key_vrm").as_deref(), Some("HN11EYW"));
    upstream.stop().await;
}

#[rstest]
#[case::unknown_plate(CannedResponse::json(&json!({
    "Response": { "StatusCode": "ItemNotFound", "DataItems": null }
})))]
#[case::missing_registration(CannedResponse::json(&json!({
    "Response": { "StatusCode": "Success", "DataItems": {} }
})))]
#[case::http_not_found(CannedResponse::json(&json!({})).with_status(404))]
#[actix_web::test]
async fn misses_are_not_found(#[case] response: CannedResponse) {
    let upstream = FakeUpstream::start(move |_| response.clone());
    let lookup = source(&upstream, Duration::from_secs(5));

    let outcome = lookup.resolve(&vrn("AB12CDE")).await.expect("lookup");

    assert_eq!(outcome, VehicleLookupOutcome::NotFound);
    upstream.stop().await;
}

#[rstest]
#[actix_web::test]
async fn non_json_body_is_a_decode_error() {
    let upstream = FakeUpstream::start(|_| CannedResponse::xml("<error>quota</error>"));
    let lookup = source(&upstream, Duration::from_secs(5));

    let err = lookup.resolve(&vrn("AB12CDE")).await.expect_err("decode");

    assert!(matches!(err, VehicleLookupError::Decode { .. }), "{err:?}");
    upstream.stop().await;
}

#[rstest]
#[actix_web::test]
async fn server_error_is_a_transport_error() {
    let upstream = FakeUpstream::start(|_| CannedResponse::json(&json!({})).with_status(502));
    let lookup = source(&upstream, Duration::from_secs(5));

    let err = lookup.resolve(&vrn("AB12CDE")).await.expect_err("transport");

    assert_eq!(err, VehicleLookupError::transport("status 502"));
    upstream.stop().await;
}

#[rstest]
#[actix_web::test]
async fn slow_lookup_times_out() {
    let upstream = FakeUpstream::start(|_| {
        CannedResponse::json(&json!({})).delayed(Duration::from_secs(2))
    });
    let lookup = source(&upstream, Duration::from_millis(200));

    let err = lookup.resolve(&vrn("AB12CDE")).await.expect_err("timeout");

    assert!(matches!(err, VehicleLookupError::Timeout { .. }), "{err:?}");
    upstream.stop().await;
}
