//! Glass part identifiers and priced options returned by the supplier.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Number of leading ARGIC characters that identify the glass family.
pub const SHORT_ARGIC_LEN: usize = 4;

/// Validation errors for [`ArgicCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgicCodeValidationError {
    /// The code was blank.
    #[error("ARGIC code must not be empty")]
    Empty,
    /// The code contains whitespace or control characters.
    #[error("ARGIC code must not contain whitespace or control characters")]
    InvalidCharacter,
}

/// Industry part identifier for one automotive glass item.
///
/// # Examples
/// ```
/// use glasstrade::domain::ArgicCode;
///
/// let code = ArgicCode::parse(" 2448agnmv1b ").expect("valid code");
/// assert_eq!(code.as_str(), "2448AGNMV1B");
/// assert_eq!(code.short_code(), "2448");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgicCode(String);

impl ArgicCode {
    /// Trim, upper-case and validate a raw code.
    ///
    /// # Errors
    ///
    /// Returns [`ArgicCodeValidationError`] for blank codes or codes with
    /// embedded whitespace.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ArgicCodeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ArgicCodeValidationError::Empty);
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ArgicCodeValidationError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the full code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Four-character family prefix.
    pub fn short_code(&self) -> String {
        short_code_of(&self.0)
    }
}

impl fmt::Display for ArgicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First [`SHORT_ARGIC_LEN`] characters of `code`.
pub fn short_code_of(code: &str) -> String {
    code.chars().take(SHORT_ARGIC_LEN).collect()
}

/// One priced, stocked glass part offered for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlassPartOption {
    /// Full ARGIC code.
    pub full_code: String,
    /// Four-character ARGIC prefix.
    pub short_code: String,
    /// Supplier's own part reference.
    pub mag_code: String,
    /// Free-text part description.
    pub description: String,
    /// Vehicle make the part is listed under.
    pub make: String,
    /// Unit price in pounds.
    #[schema(value_type = String, example = "129.50")]
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    /// Free-text pricing notes.
    pub price_info: String,
}

/// One row of a stock search by ARGIC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockSearchItem {
    /// Full ARGIC code.
    pub argic_code: String,
    /// Free-text part description.
    pub description: String,
    /// Depot holding the stock.
    pub depot_code: String,
    /// Units in stock at the depot.
    pub quantity: u32,
    /// Unit price in pounds.
    #[schema(value_type = String, example = "129.50")]
    pub price: Decimal,
}
