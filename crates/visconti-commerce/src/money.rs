//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Menu prices arrive
//! from the backend as decimal numbers and are rounded to the cent once, at
//! the boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of minor units per major unit.
    pub fn minor_units(&self) -> i64 {
        100
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a euro amount from cents.
    pub fn eur(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::EUR)
    }

    /// Create a Money value from a decimal amount, rounded to the cent.
    ///
    /// ```
    /// use visconti_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(7.5, Currency::EUR);
    /// assert_eq!(price.amount_cents, 750);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Format as a display string (e.g., "€17.50").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "17.50").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let units = self.currency.minor_units() as u64;
        format!("{sign}{}.{:02}", abs / units, abs % units)
    }

    /// Calculate a percentage of this amount, rounded to the cent.
    pub fn percentage(&self, percent: f64) -> Money {
        let cents = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(cents, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Deserialize a backend price into euros.
///
/// The menu API sends prices as JSON numbers, but older records carry them
/// as strings (`"7.50"`, sometimes with a `€` prefix or a decimal comma).
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => price_from_f64(n).map_err(serde::de::Error::custom),
        RawPrice::Text(s) => parse_price(&s).map_err(serde::de::Error::custom),
    }
}

/// Serialize a price the way the backend sends it: a plain decimal number.
pub fn serialize_price<S>(price: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(price.to_decimal())
}

/// Parse a price string such as `"7.50"`, `"€ 7,50"` or `"12"`.
pub fn parse_price(raw: &str) -> Result<Money, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('\u{20ac}')
        .trim()
        .replace(',', ".");
    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("not a price: {raw:?}"))?;
    price_from_f64(value)
}

fn price_from_f64(value: f64) -> Result<Money, String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("price must be a non-negative number, got {value}"));
    }
    Ok(Money::from_decimal(value, Currency::EUR))
}
