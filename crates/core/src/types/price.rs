//! Price type and the deterministic list-price derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., baht, not satang).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    THB,
    USD,
}

/// Smallest derived base price in THB.
const BASE_MIN: u32 = 180;
/// Largest derived base price in THB.
const BASE_MAX: u32 = 420;
/// Summary length at which the content factor saturates.
const SUMMARY_SATURATION: usize = 2000;

/// Derive the deterministic display price for a book.
///
/// Catalog documents carry no price; the storefront derives one from stable
/// book attributes so every render agrees:
///
/// 1. seed = ISBN when present, otherwise the book id rendered as a string
/// 2. a Java-style 31-hash of the seed (wrapping 32-bit arithmetic) picks a
///    base in `180..=420` THB
/// 3. longer summaries scale the base by up to 1.25x, saturating at 2000
///    characters
/// 4. the result is rounded to the nearest 10 THB
///
/// # Example
///
/// ```
/// use bookbuddy_core::derive_list_price;
///
/// let a = derive_list_price(Some("9781421500263"), "", 120);
/// let b = derive_list_price(Some("9781421500263"), "", 120);
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn derive_list_price(isbn: Option<&str>, fallback_id: &str, summary_len: usize) -> Price {
    let seed = match isbn {
        Some(s) if !s.is_empty() => s,
        _ => fallback_id,
    };

    let base = seeded_int(BASE_MIN, BASE_MAX, seed);

    #[allow(clippy::cast_precision_loss)] // summary lengths are far below f64 precision
    let content_factor = (1.0
        + (summary_len.min(SUMMARY_SATURATION) as f64 / SUMMARY_SATURATION as f64) * 0.25)
        .min(1.25);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let amount = ((f64::from(base) * content_factor / 10.0).round() as u32) * 10;

    Price::new(Decimal::from(amount), CurrencyCode::THB)
}

/// Deterministic integer in `min..=max` from a string seed.
///
/// Java-style 31-hash with wrapping 32-bit arithmetic over the seed's UTF-16
/// code units, matching the original storefront's derivation exactly.
fn seeded_int(min: u32, max: u32, seed: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in seed.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    min + h.unsigned_abs() % (max - min + 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_int_in_range() {
        for seed in ["9781421500263", "1", "", "a-long-seed-with-dashes"] {
            let v = seeded_int(180, 420, seed);
            assert!((180..=420).contains(&v), "seed {seed:?} gave {v}");
        }
    }

    #[test]
    fn test_seeded_int_deterministic() {
        assert_eq!(
            seeded_int(180, 420, "9781421500263"),
            seeded_int(180, 420, "9781421500263")
        );
    }

    #[test]
    fn test_derive_price_rounds_to_ten() {
        let price = derive_list_price(Some("9781421500263"), "", 0);
        assert_eq!(price.amount % Decimal::from(10), Decimal::ZERO);
        assert_eq!(price.currency_code, CurrencyCode::THB);
    }

    #[test]
    fn test_derive_price_falls_back_to_id() {
        let by_id = derive_list_price(None, "42", 0);
        assert_eq!(by_id, derive_list_price(Some(""), "42", 0));
    }

    #[test]
    fn test_longer_summary_never_cheaper() {
        let short = derive_list_price(Some("9781421500263"), "", 0);
        let long = derive_list_price(Some("9781421500263"), "", 4000);
        assert!(long.amount >= short.amount);
    }

    #[test]
    fn test_content_factor_saturates() {
        let at_limit = derive_list_price(Some("x"), "", 2000);
        let beyond = derive_list_price(Some("x"), "", 50_000);
        assert_eq!(at_limit, beyond);
    }

    #[test]
    fn test_price_bounds() {
        // base <= 420, factor <= 1.25 => at most 530 after rounding
        for seed in ["a", "b", "c", "9784088725093"] {
            let price = derive_list_price(Some(seed), "", 50_000);
            assert!(price.amount >= Decimal::from(180));
            assert!(price.amount <= Decimal::from(530));
        }
    }
}
