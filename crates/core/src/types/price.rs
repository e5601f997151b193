//! Prices and percentage discounts using decimal arithmetic.
//!
//! The store API keeps `product_price` and `discount` as whatever the admin
//! form sent, so values arrive either as JSON numbers or as numeric strings.
//! `rust_decimal` deserializes both, and no float rounding error leaks into
//! the discounted price shown on product cards.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`Price`] from form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// No value was entered.
    #[error("price is required")]
    Empty,
    /// The value is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The value is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The value is above [`Price::MAX_AMOUNT`].
    #[error("price is too large")]
    TooLarge,
}

/// Errors that can occur when parsing a [`Discount`] from form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// No value was entered.
    #[error("discount is required")]
    Empty,
    /// The value is not a decimal number.
    #[error("discount must be a number")]
    NotANumber,
    /// The value is outside 0-100.
    #[error("discount must be between 0 and 100")]
    OutOfRange,
}

/// A product price in the store's currency.
///
/// Deserialization is transparent and unvalidated: the API owns product
/// records and the storefront renders whatever it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Largest amount the admin form accepts.
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero and
    /// [`PriceError::TooLarge`] above [`Price::MAX_AMOUNT`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX_AMOUNT {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed into a form field.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is blank, not numeric, or negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount: Decimal = input.parse().map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price after applying a percentage discount, rounded to two decimals.
    ///
    /// Computes `price - price * discount / 100`. Midpoints round away from
    /// zero, so `2.35` at 50% yields `1.18`.
    ///
    /// API records are not range-checked; if the arithmetic overflows the
    /// undiscounted price is returned.
    #[must_use]
    pub fn discounted(&self, discount: Discount) -> Self {
        let percent = discount.clamped().percent();
        let amount = self
            .0
            .checked_mul(percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|reduction| self.0.checked_sub(reduction))
            .unwrap_or(self.0);
        Self(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Format for display with two decimals (e.g. `$19.90`).
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        format!("${amount}")
    }
}

/// A percentage discount between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Discount(Decimal);

impl Discount {
    /// No discount.
    pub const NONE: Self = Self(Decimal::ZERO);

    /// Create a discount from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] unless `0 <= percent <= 100`.
    pub fn new(percent: Decimal) -> Result<Self, DiscountError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DiscountError::OutOfRange);
        }
        Ok(Self(percent))
    }

    /// Parse a discount typed into a form field.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the input is blank, not numeric, or out of range.
    pub fn parse(input: &str) -> Result<Self, DiscountError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DiscountError::Empty);
        }
        let percent: Decimal = input.parse().map_err(|_| DiscountError::NotANumber)?;
        Self::new(percent)
    }

    /// The percentage value.
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Whether this discount reduces the price at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.clamped().0 > Decimal::ZERO
    }

    /// The discount forced into 0-100, for values decoded straight from the API.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self(self.0.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Format for display (e.g. `15%`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}%", self.0.normalize())
    }
}
