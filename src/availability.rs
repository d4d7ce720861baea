// Date-range availability checking.
// A stay is the half-open interval [check_in, check_out): the checkout day is free
// for the next guest, so back-to-back bookings never collide.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::{Booking, BookingStatus};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid range: check-out {check_out} must be after check-in {check_in}")]
pub struct InvalidRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// A validated half-open stay interval. Constructing one guarantees at least one
/// night, so downstream arithmetic never sees an empty or inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidRange> {
        if check_out <= check_in {
            return Err(InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights stayed; always >= 1 for a constructed range.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Standard half-open overlap test: `[A,B)` meets `[C,D)` iff C < B && D > A.
    /// Touching boundaries (checkout day = next check-in day) do not overlap.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        check_in < self.check_out && check_out > self.check_in
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

/// Pure availability predicate over bookings already fetched from the store.
/// Bookings for other rooms and cancelled bookings are ignored; any remaining
/// overlap makes the room unavailable. Performs no I/O.
pub fn is_range_available(room_id: &str, candidate: DateRange, bookings: &[Booking]) -> bool {
    !bookings.iter().any(|booking| {
        booking.room_id == room_id
            && booking.status != BookingStatus::Cancelled
            && candidate.overlaps(booking.check_in_date, booking.check_out_date)
    })
}

/// Convenience entry point for callers holding raw dates.
pub fn check_dates_available(
    room_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    bookings: &[Booking],
) -> Result<bool, InvalidRange> {
    let candidate = DateRange::new(check_in, check_out)?;
    Ok(is_range_available(room_id, candidate, bookings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking_on(room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: format!("bk-{}-{}", room_id, check_in),
            room_id: room_id.to_string(),
            guest_id: "guest-1".to_string(),
            check_in_date: check_in,
            check_out_date: check_out,
            guest_count: 2,
            total_amount: 0,
            status: BookingStatus::Confirmed,
            special_requests: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_degenerate_range_rejected() {
        let d = date(2024, 6, 5);
        assert!(DateRange::new(d, d).is_err());
        assert!(DateRange::new(d, date(2024, 6, 1)).is_err());

        let err = DateRange::new(d, d).unwrap_err();
        assert_eq!(err.check_in, d);
        assert_eq!(err.check_out, d);
    }

    #[test]
    fn test_nights_counts_whole_days() {
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 4)).unwrap();
        assert_eq!(range.nights(), 3);

        // Month boundary, 30-day June
        let range = DateRange::new(date(2024, 6, 28), date(2024, 7, 2)).unwrap();
        assert_eq!(range.nights(), 4);

        // Year boundary
        let range = DateRange::new(date(2024, 12, 30), date(2025, 1, 2)).unwrap();
        assert_eq!(range.nights(), 3);
    }

    // Existing booking [2024-06-05, 2024-06-10) on room-1 in every case.
    #[test_case(date(2024, 6, 1), date(2024, 6, 5), true; "#1 candidate ends at existing start")]
    #[test_case(date(2024, 6, 10), date(2024, 6, 12), true; "#2 candidate starts at existing end")]
    #[test_case(date(2024, 6, 1), date(2024, 6, 6), false; "#3 overlap at front")]
    #[test_case(date(2024, 6, 9), date(2024, 6, 12), false; "#4 overlap at back")]
    #[test_case(date(2024, 6, 6), date(2024, 6, 8), false; "#5 candidate inside existing")]
    #[test_case(date(2024, 6, 1), date(2024, 6, 15), false; "#6 candidate swallows existing")]
    #[test_case(date(2024, 6, 5), date(2024, 6, 10), false; "#7 identical range")]
    #[test_case(date(2024, 5, 1), date(2024, 5, 20), true; "#8 fully before")]
    #[test_case(date(2024, 7, 1), date(2024, 7, 4), true; "#9 fully after")]
    fn test_overlap_cases(check_in: NaiveDate, check_out: NaiveDate, expect_available: bool) {
        let bookings = vec![booking_on("room-1", date(2024, 6, 5), date(2024, 6, 10))];
        let candidate = DateRange::new(check_in, check_out).unwrap();
        assert_eq!(
            is_range_available("room-1", candidate, &bookings),
            expect_available
        );
    }

    #[test]
    fn test_back_to_back_bookings_available() {
        // Booking A = [2024-06-01, 2024-06-05), candidate B = [2024-06-05, 2024-06-08)
        let bookings = vec![booking_on("room-1", date(2024, 6, 1), date(2024, 6, 5))];
        let candidate = DateRange::new(date(2024, 6, 5), date(2024, 6, 8)).unwrap();
        assert!(is_range_available("room-1", candidate, &bookings));
    }

    #[test]
    fn test_cancelled_bookings_do_not_block() {
        let mut cancelled = booking_on("room-1", date(2024, 6, 5), date(2024, 6, 10));
        cancelled.status = BookingStatus::Cancelled;

        let candidate = DateRange::new(date(2024, 6, 6), date(2024, 6, 8)).unwrap();
        assert!(is_range_available("room-1", candidate, &[cancelled.clone()]));

        // A pending booking over the same dates still blocks.
        let mut pending = booking_on("room-1", date(2024, 6, 5), date(2024, 6, 10));
        pending.status = BookingStatus::Pending;
        assert!(!is_range_available("room-1", candidate, &[cancelled, pending]));
    }

    #[test]
    fn test_other_rooms_are_ignored() {
        let bookings = vec![booking_on("room-2", date(2024, 6, 5), date(2024, 6, 10))];
        let candidate = DateRange::new(date(2024, 6, 6), date(2024, 6, 8)).unwrap();
        assert!(is_range_available("room-1", candidate, &bookings));
        assert!(!is_range_available("room-2", candidate, &bookings));
    }

    #[test]
    fn test_check_dates_available_validates_range() {
        let bookings = vec![];
        let result = check_dates_available("room-1", date(2024, 6, 5), date(2024, 6, 5), &bookings);
        assert!(result.is_err());

        let result = check_dates_available("room-1", date(2024, 6, 5), date(2024, 6, 6), &bookings);
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 5)).unwrap();
        assert!(range.contains(date(2024, 6, 1)));
        assert!(range.contains(date(2024, 6, 4)));
        assert!(!range.contains(date(2024, 6, 5)));
        assert!(!range.contains(date(2024, 5, 31)));
    }
}
