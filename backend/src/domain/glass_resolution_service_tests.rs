//! Tests for the glass resolution pipeline.

use std::sync::Arc;

use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::domain::demo_fixture::DEMO_VRN;
use crate::domain::ports::{MockSupplierStockSource, MockVehicleLookup, SupplierStockError};
use crate::domain::{ErrorCode, GlassPartOption, VehicleSummary};

fn vrn(raw: &str) -> Vrn {
    Vrn::parse(raw).expect("valid registration")
}

fn focus(vrn: &Vrn) -> VehicleSummary {
    VehicleSummary {
        make: Some("FORD".to_owned()),
        model: Some("FOCUS".to_owned()),
        year_of_manufacture: Some(2015),
        body_style: Some("HATCHBACK".to_owned()),
        ..VehicleSummary::for_registration(vrn)
    }
}

fn option(full_code: &str, price_minor: i64) -> GlassPartOption {
    GlassPartOption {
        full_code: full_code.to_owned(),
        short_code: full_code.chars().take(4).collect(),
        mag_code: String::new(),
        description: "Windscreen".to_owned(),
        make: "FORD".to_owned(),
        price: Decimal::new(price_minor, 2),
        quantity: 2,
        price_info: String::new(),
    }
}

fn make_service(
    vehicles: MockVehicleLookup,
    supplier: MockSupplierStockSource,
) -> GlassResolutionService<MockVehicleLookup, MockSupplierStockSource> {
    GlassResolutionService::new(Arc::new(vehicles), Arc::new(supplier))
}

#[tokio::test]
async fn demo_registration_short_circuits_every_call() {
    // Mocks without expectations panic when called.
    let service = make_service(MockVehicleLookup::new(), MockSupplierStockSource::new());
    let demo = vrn(DEMO_VRN);

    let first = service.resolve_glass_for_vrn(&demo).await.expect("demo");
    let second = service.resolve_glass_for_vrn(&demo).await.expect("demo");

    assert_eq!(first, second);
    let GlassResolution::Resolved {
        vehicle,
        glass_options,
    } = first
    else {
        panic!("expected a resolved demo vehicle");
    };
    assert_eq!(vehicle.registration, DEMO_VRN);
    assert!(!glass_options.is_empty());
    assert_eq!(
        vehicle.argic_code.as_deref(),
        glass_options.first().map(|o| o.full_code.as_str())
    );
}

#[tokio::test]
async fn unknown_registration_is_terminal() {
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .times(1)
        .return_once(|_| Ok(VehicleLookupOutcome::NotFound));

    let service = make_service(vehicles, MockSupplierStockSource::new());
    let result = service
        .resolve_glass_for_vrn(&vrn("ZZ99ZZZ"))
        .await
        .expect("lookup succeeds");

    assert_eq!(result, GlassResolution::NotFound);
}

#[tokio::test]
async fn vehicle_lookup_failure_is_service_unavailable() {
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .times(1)
        .return_once(|_| Err(VehicleLookupError::timeout("10s elapsed")));

    let service = make_service(vehicles, MockSupplierStockSource::new());
    let error = service
        .resolve_glass_for_vrn(&vrn("AB12CDE"))
        .await
        .expect_err("lookup fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(!error.message().contains("10s"));
}

#[tokio::test]
async fn incomplete_vehicle_skips_supplier() {
    let plate = vrn("AB12CDE");
    let vehicle = VehicleSummary {
        year_of_manufacture: None,
        ..focus(&plate)
    };
    let expected = vehicle.clone();
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .times(1)
        .return_once(move |_| Ok(VehicleLookupOutcome::Found(vehicle)));

    let service = make_service(vehicles, MockSupplierStockSource::new());
    let result = service.resolve_glass_for_vrn(&plate).await.expect("resolves");

    assert_eq!(
        result,
        GlassResolution::Resolved {
            vehicle: expected,
            glass_options: Vec::new(),
        }
    );
}

#[tokio::test]
async fn first_option_sets_primary_codes() {
    let plate = vrn("AB12CDE");
    let vehicle = focus(&plate);
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .times(1)
        .return_once(move |_| Ok(VehicleLookupOutcome::Found(vehicle)));

    let mut supplier = MockSupplierStockSource::new();
    supplier
        .expect_stock_by_vehicle()
        .withf(|query| {
            query.make == "FORD"
                && query.model == "FOCUS"
                && query.year == 2015
                && query.model_type.is_none()
        })
        .times(1)
        // The cheaper option comes second; ordering is the supplier's.
        .return_once(|_| Ok(vec![option("3536AGSGY", 21_000), option("2448AGN", 9_900)]));

    let service = make_service(vehicles, supplier);
    let result = service.resolve_glass_for_vrn(&plate).await.expect("resolves");

    let GlassResolution::Resolved {
        vehicle,
        glass_options,
    } = result
    else {
        panic!("expected a resolved vehicle");
    };
    assert_eq!(glass_options.len(), 2);
    assert_eq!(vehicle.argic_code.as_deref(), Some("3536AGSGY"));
    assert_eq!(vehicle.short_argic_code.as_deref(), Some("3536"));
}

#[tokio::test]
async fn empty_supplier_result_leaves_primary_codes_unset() {
    let plate = vrn("AB12CDE");
    let vehicle = focus(&plate);
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .return_once(move |_| Ok(VehicleLookupOutcome::Found(vehicle)));
    let mut supplier = MockSupplierStockSource::new();
    supplier
        .expect_stock_by_vehicle()
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(vehicles, supplier);
    let result = service.resolve_glass_for_vrn(&plate).await.expect("resolves");

    let GlassResolution::Resolved { vehicle, .. } = result else {
        panic!("expected a resolved vehicle");
    };
    assert!(vehicle.argic_code.is_none());
}

#[tokio::test]
async fn supplier_failure_keeps_vehicle() {
    let plate = vrn("AB12CDE");
    let vehicle = focus(&plate);
    let expected = vehicle.clone();
    let mut vehicles = MockVehicleLookup::new();
    vehicles
        .expect_resolve()
        .return_once(move |_| Ok(VehicleLookupOutcome::Found(vehicle)));
    let mut supplier = MockSupplierStockSource::new();
    supplier
        .expect_stock_by_vehicle()
        .times(1)
        .return_once(|_| {
            Err(SupplierStockError::http_status(
                502_u16,
                "<html>host db-01.supplier.local</html>",
            ))
        });

    let service = make_service(vehicles, supplier);
    let result = service.resolve_glass_for_vrn(&plate).await.expect("partial");

    let GlassResolution::Partial { vehicle, warning } = result else {
        panic!("expected a partial resolution");
    };
    assert_eq!(vehicle, expected);
    assert_eq!(warning, "supplier returned HTTP 502");
}

#[rstest]
#[case(SupplierStockError::timeout("operation timed out after 30s"), "supplier timeout")]
#[case(
    SupplierStockError::transport("error sending request for url (https://supplier.example/soap)"),
    "supplier unavailable"
)]
#[case(
    SupplierStockError::fault("InvalidLogin: bad credentials"),
    "supplier reported failure: InvalidLogin: bad credentials"
)]
#[case(SupplierStockError::invalid_request("make must not be blank"), "supplier request invalid")]
fn partial_warning_omits_adapter_detail(
    #[case] error: SupplierStockError,
    #[case] expected: &str,
) {
    assert_eq!(partial_warning(&error), expected);
}
