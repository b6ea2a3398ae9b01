//! DTOs for decoding registration lookup responses.
//!
//! Only `Response.StatusCode == "Success"` with a `VehicleRegistration`
//! block counts as a hit; any other shape is a miss.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{VehicleSummary, Vrn};

const SUCCESS_STATUS: &str = "Success";

#[derive(Debug, Deserialize)]
pub(super) struct LookupEnvelopeDto {
    #[serde(rename = "Response")]
    response: Option<LookupResponseDto>,
}

#[derive(Debug, Deserialize)]
struct LookupResponseDto {
    #[serde(rename = "StatusCode")]
    status_code: Option<String>,
    #[serde(rename = "DataItems")]
    data_items: Option<DataItemsDto>,
}

#[derive(Debug, Deserialize)]
struct DataItemsDto {
    #[serde(rename = "VehicleRegistration")]
    vehicle_registration: Option<VehicleRegistrationDto>,
}

#[derive(Debug, Deserialize)]
struct VehicleRegistrationDto {
    #[serde(rename = "Make")]
    make: Option<String>,
    #[serde(rename = "Model")]
    model: Option<String>,
    #[serde(rename = "YearOfManufacture")]
    year_of_manufacture: Option<Value>,
    #[serde(rename = "BodyStyle")]
    body_style: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// The service sends the year as a string or a number depending on vintage.
fn year(value: Option<&Value>) -> Option<u16> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl LookupEnvelopeDto {
    /// Vehicle summary for `vrn`, or `None` when the response is not a hit.
    pub(super) fn into_summary(self, vrn: &Vrn) -> Option<VehicleSummary> {
        let response = self.response?;
        if response.status_code.as_deref() != Some(SUCCESS_STATUS) {
            return None;
        }
        let registration = response.data_items?.vehicle_registration?;
        Some(VehicleSummary {
            year_of_manufacture: year(registration.year_of_manufacture.as_ref()),
            make: non_blank(registration.make),
            model: non_blank(registration.model),
            body_style: non_blank(registration.body_style),
            ..VehicleSummary::for_registration(vrn)
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn decode(value: Value) -> Option<VehicleSummary> {
        let vrn = Vrn::parse("AB12CDE").expect("valid registration");
        serde_json::from_value::<LookupEnvelopeDto>(value)
            .ok()
            .and_then(|dto| dto.into_summary(&vrn))
    }

    #[rstest]
    #[case(json!("2011"))]
    #[case(json!(2011))]
    fn success_maps_vehicle_fields(#[case] year: Value) {
        let summary = decode(json!({
            "Response": {
                "StatusCode": "Success",
                "DataItems": {
                    "VehicleRegistration": {
                        "Make": "FORD",
                        "Model": "FOCUS ZETEC",
                        "YearOfManufacture": year,
                        "BodyStyle": null
                    }
                }
            }
        }))
        .expect("hit");

        assert_eq!(summary.registration, "AB12CDE");
        assert_eq!(summary.make.as_deref(), Some("FORD"));
        assert_eq!(summary.model.as_deref(), Some("FOCUS ZETEC"));
        assert_eq!(summary.year_of_manufacture, Some(2011));
        assert_eq!(summary.body_style, None);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "Response": { "StatusCode": "KeyInvalid" } }))]
    #[case(json!({ "Response": { "StatusCode": "Success", "DataItems": {} } }))]
    #[case(json!({
        "Response": { "StatusCode": "ItemNotFound", "DataItems": { "VehicleRegistration": {} } }
    }))]
    fn other_shapes_are_misses(#[case] body: Value) {
        assert!(decode(body).is_none());
    }
}
