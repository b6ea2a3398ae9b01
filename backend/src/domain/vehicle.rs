//! Vehicle identity types resolved from registration lookups.
//!
//! A [`Vrn`] is normalised once at the boundary so every downstream call
//! (registration API, demo short-circuit, logs) sees the same spelling.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::glass::GlassPartOption;

/// Longest registration accepted after whitespace is removed.
const VRN_MAX_LEN: usize = 8;

/// Validation errors for [`Vrn`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VrnValidationError {
    /// Nothing remained after trimming whitespace.
    #[error("registration number must not be empty")]
    Empty,
    /// The registration contains characters other than ASCII letters/digits.
    #[error("registration number must contain only letters and digits")]
    InvalidCharacter,
    /// The registration exceeds the longest UK plate format.
    #[error("registration number must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Normalised vehicle registration number (upper case, no whitespace).
///
/// # Examples
/// ```
/// use glasstrade::domain::Vrn;
///
/// let vrn = Vrn::parse(" hn11 eyw ").expect("valid registration");
/// assert_eq!(vrn.as_str(), "HN11EYW");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vrn(String);

impl Vrn {
    /// Normalise casing and whitespace, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`VrnValidationError`] when the value is empty, too long, or
    /// contains punctuation.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, VrnValidationError> {
        let normalised: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if normalised.is_empty() {
            return Err(VrnValidationError::Empty);
        }
        if !normalised.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(VrnValidationError::InvalidCharacter);
        }
        if normalised.len() > VRN_MAX_LEN {
            return Err(VrnValidationError::TooLong { max: VRN_MAX_LEN });
        }
        Ok(Self(normalised))
    }

    /// Borrow the normalised registration.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Vrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle attributes returned by the registration lookup.
///
/// `argic_code` and `short_argic_code` stay empty until glass resolution
/// selects a primary part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    /// Normalised registration.
    pub registration: String,
    /// Manufacturer, e.g. `FORD`.
    pub make: Option<String>,
    /// Model name, e.g. `FOCUS`.
    pub model: Option<String>,
    /// Year of first manufacture.
    pub year_of_manufacture: Option<u16>,
    /// Body style, e.g. `5 DOOR HATCHBACK`.
    pub body_style: Option<String>,
    /// ARGIC code of the primary glass option, when one was resolved.
    pub argic_code: Option<String>,
    /// Four-character ARGIC prefix of the primary glass option.
    pub short_argic_code: Option<String>,
}

/// Vehicle attributes required to query supplier stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLookupAttributes<'a> {
    /// Manufacturer.
    pub make: &'a str,
    /// Model name.
    pub model: &'a str,
    /// Year of manufacture.
    pub year: u16,
}

impl VehicleSummary {
    /// Build a summary carrying only the registration.
    pub fn for_registration(vrn: &Vrn) -> Self {
        Self {
            registration: vrn.as_str().to_owned(),
            make: None,
            model: None,
            year_of_manufacture: None,
            body_style: None,
            argic_code: None,
            short_argic_code: None,
        }
    }

    /// Return make, model and year when all three are present and non-blank.
    pub fn stock_lookup_attributes(&self) -> Option<StockLookupAttributes<'_>> {
        let make = non_blank(self.make.as_deref())?;
        let model = non_blank(self.model.as_deref())?;
        let year = self.year_of_manufacture?;
        Some(StockLookupAttributes { make, model, year })
    }

    /// Record `option` as the vehicle's primary glass part.
    #[must_use]
    pub fn with_primary_glass(mut self, option: &GlassPartOption) -> Self {
        self.argic_code = Some(option.full_code.clone());
        self.short_argic_code = Some(option.short_code.clone());
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
