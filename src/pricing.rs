// Stay pricing: nights, subtotal, tax and total for a date range.
// Amounts are minor-unit-free integers; tax is rounded to the nearest unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{DateRange, InvalidRange};

/// Itemized price for a stay. Deterministic, no side effects, no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub nights: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl Quote {
    /// Prices `range` at `price_per_night` with `tax_rate` expressed as a fraction
    /// (0.18 for 18%). The range is already validated, so nights >= 1 holds.
    pub fn compute(price_per_night: i64, range: DateRange, tax_rate: f64) -> Self {
        let nights = range.nights();
        let subtotal = nights * price_per_night;
        let tax = (subtotal as f64 * tax_rate).round() as i64;
        Self {
            nights,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Raw-date entry point for callers that have not built a range yet.
    pub fn compute_for_dates(
        price_per_night: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        tax_rate: f64,
    ) -> Result<Self, InvalidRange> {
        let range = DateRange::new(check_in, check_out)?;
        Ok(Self::compute(price_per_night, range, tax_rate))
    }
}
