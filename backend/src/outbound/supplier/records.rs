//! Mapping of extracted supplier records into domain types.
//!
//! Numbers arrive as free text. Prices that do not parse become zero and
//! quantities that do not parse, or are negative, become zero. Records
//! without their identifying code are dropped.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::envelope::SoapRecord;
use crate::domain::{
    BranchStock, DepotAddress, DepotDirectoryEntry, GlassPartOption, StockSearchItem,
    short_code_of,
};

/// Record tag and fields returned by `getStockList`.
pub(crate) const PRICE_RECORD: (&str, &[&str]) = (
    "PriceRecord",
    &[
        "ArgicCode",
        "ShortCode",
        "MagCode",
        "Description",
        "Make",
        "Price",
        "Qty",
        "PriceInfo",
    ],
);

/// Record tag and fields returned by `GetDepots`.
pub(crate) const DEPOT_RECORD: (&str, &[&str]) = (
    "Depot",
    &[
        "DepotCode",
        "DepotName",
        "Address1",
        "Address2",
        "Town",
        "County",
        "PostCode",
        "Telephone",
        "Email",
    ],
);

/// Record tag and fields returned by `getBranchAvailability`.
pub(crate) const BRANCH_RECORD: (&str, &[&str]) = ("StockItem", &["DepotCode", "Qty", "Price"]);

/// Record tag and fields returned by `StockSearch`.
pub(crate) const STOCK_SEARCH_RECORD: (&str, &[&str]) = (
    "StockItem",
    &["ArgicCode", "Description", "DepotCode", "Qty", "Price"],
);

pub(crate) fn parse_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('£')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

pub(crate) fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(quantity) = trimmed.parse::<u32>() {
        return quantity;
    }
    // Some operations report quantities as decimals ("3.0000").
    Decimal::from_str(trimmed)
        .ok()
        .filter(|value| value.is_sign_positive())
        .and_then(|value| value.trunc().to_u32())
        .unwrap_or(0)
}

pub(crate) fn glass_option(record: &SoapRecord) -> Option<GlassPartOption> {
    let full_code = record.non_blank("ArgicCode")?.to_ascii_uppercase();
    let short_code = record
        .non_blank("ShortCode")
        .map_or_else(|| short_code_of(&full_code), str::to_owned);
    Some(GlassPartOption {
        short_code,
        mag_code: record.field("MagCode").to_owned(),
        description: record.field("Description").to_owned(),
        make: record.field("Make").to_owned(),
        price: parse_price(record.field("Price")),
        quantity: parse_quantity(record.field("Qty")),
        price_info: record.field("PriceInfo").to_owned(),
        full_code,
    })
}

pub(crate) fn depot(record: &SoapRecord) -> Option<DepotDirectoryEntry> {
    let depot_code = record.non_blank("DepotCode")?.to_owned();
    Some(DepotDirectoryEntry {
        depot_code,
        depot_name: record.field("DepotName").to_owned(),
        address: DepotAddress {
            line1: record.field("Address1").to_owned(),
            line2: record.field("Address2").to_owned(),
            town: record.field("Town").to_owned(),
            county: record.field("County").to_owned(),
            postcode: record.field("PostCode").to_owned(),
        },
        telephone: record.field("Telephone").to_owned(),
        email: record.field("Email").to_owned(),
    })
}

pub(crate) fn branch_stock(record: &SoapRecord) -> Option<BranchStock> {
    Some(BranchStock {
        depot_code: record.non_blank("DepotCode")?.to_owned(),
        quantity: parse_quantity(record.field("Qty")),
        price: parse_price(record.field("Price")),
    })
}

pub(crate) fn stock_search_item(record: &SoapRecord) -> Option<StockSearchItem> {
    Some(StockSearchItem {
        argic_code: record.non_blank("ArgicCode")?.to_ascii_uppercase(),
        description: record.field("Description").to_owned(),
        depot_code: record.field("DepotCode").to_owned(),
        quantity: parse_quantity(record.field("Qty")),
        price: parse_price(record.field("Price")),
    })
}
