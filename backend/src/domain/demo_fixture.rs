//! Canned resolution served for the sales demonstration registration.

use rust_decimal::Decimal;

use super::{GlassPartOption, VehicleSummary, Vrn, short_code_of};

/// Registration that always resolves to the demonstration vehicle.
pub const DEMO_VRN: &str = "HN11EYW";

/// Whether `vrn` is the demonstration registration.
pub fn is_demo_vrn(vrn: &Vrn) -> bool {
    vrn.as_str() == DEMO_VRN
}

fn demo_option(
    full_code: &str,
    mag_code: &str,
    description: &str,
    price_minor: i64,
    quantity: u32,
) -> GlassPartOption {
    GlassPartOption {
        full_code: full_code.to_owned(),
        short_code: short_code_of(full_code),
        mag_code: mag_code.to_owned(),
        description: description.to_owned(),
        make: "FORD".to_owned(),
        price: Decimal::new(price_minor, 2),
        quantity,
        price_info: "Trade price ex VAT".to_owned(),
    }
}

/// Demonstration glass options, in the order the supplier would list them.
pub fn demo_glass_options() -> Vec<GlassPartOption> {
    vec![
        demo_option(
            "2448AGNMV1B",
            "FOR12345",
            "Windscreen green tint, rain sensor, heated",
            18_950,
            6,
        ),
        demo_option(
            "2448AGNV",
            "FOR12301",
            "Windscreen green tint",
            12_450,
            14,
        ),
        demo_option(
            "2448LGNS5RD",
            "FOR12388",
            "Rear door glass right, green tint",
            4_275,
            3,
        ),
    ]
}

/// Demonstration vehicle with its primary glass set from the first option.
pub fn demo_vehicle(vrn: &Vrn, first_option: Option<&GlassPartOption>) -> VehicleSummary {
    let vehicle = VehicleSummary {
        make: Some("FORD".to_owned()),
        model: Some("FOCUS".to_owned()),
        year_of_manufacture: Some(2011),
        body_style: Some("5 DOOR HATCHBACK".to_owned()),
        ..VehicleSummary::for_registration(vrn)
    };
    match first_option {
        Some(option) => vehicle.with_primary_glass(option),
        None => vehicle,
    }
}
