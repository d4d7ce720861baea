// Booking record store. The hosted backend is the sole arbiter of consistency, so
// the trait requires insert_booking itself to enforce the no-overlap invariant:
// a read-then-insert done as two independent round trips can always be raced.

use async_trait::async_trait;
use thiserror::Error;

use dashmap::DashMap;

use crate::availability::DateRange;
use crate::domain::{Booking, BookingStatus, Room};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("booking not found: {0}")]
    BookingNotFound(String),

    #[error("booking conflict: room {room_id} already booked for overlapping dates")]
    Conflict { room_id: String },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Storage seam for rooms and bookings.
///
/// `insert_booking` is a conditional insert: implementations must check the overlap
/// invariant and the write atomically, and reject with `StoreError::Conflict` when a
/// non-cancelled booking on the same room overlaps the new one.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_room(&self, room_id: &str) -> Result<Room, StoreError>;

    /// Bookings for a room, optionally restricted to those overlapping `window`
    /// (the calendar widget fetches one month at a time).
    async fn list_bookings_for_room(
        &self,
        room_id: &str,
        window: Option<DateRange>,
    ) -> Result<Vec<Booking>, StoreError>;

    async fn get_booking(&self, booking_id: &str) -> Result<Booking, StoreError>;

    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, StoreError>;
}

/// In-process store keyed by room. Each room's booking list lives in one shard
/// entry, so holding the entry for check-plus-push gives the conditional insert
/// its atomicity.
#[derive(Default)]
pub struct MemoryBookingStore {
    rooms: DashMap<String, Room>,
    bookings: DashMap<String, Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    fn find_booking(&self, booking_id: &str) -> Option<(String, usize)> {
        for entry in self.bookings.iter() {
            if let Some(idx) = entry.value().iter().position(|b| b.id == booking_id) {
                return Some((entry.key().clone(), idx));
            }
        }
        None
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn get_room(&self, room_id: &str) -> Result<Room, StoreError> {
        self.rooms
            .get(room_id)
            .map(|r| r.clone())
            .ok_or_else(|| StoreError::RoomNotFound(room_id.to_string()))
    }

    async fn list_bookings_for_room(
        &self,
        room_id: &str,
        window: Option<DateRange>,
    ) -> Result<Vec<Booking>, StoreError> {
        let bookings = self
            .bookings
            .get(room_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();

        Ok(match window {
            Some(window) => bookings
                .into_iter()
                .filter(|b| window.overlaps(b.check_in_date, b.check_out_date))
                .collect(),
            None => bookings,
        })
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Booking, StoreError> {
        let (room_id, idx) = self
            .find_booking(booking_id)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;
        let entry = self
            .bookings
            .get(&room_id)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;
        entry
            .get(idx)
            .cloned()
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
        if !self.rooms.contains_key(&booking.room_id) {
            return Err(StoreError::RoomNotFound(booking.room_id.clone()));
        }

        // Exclusive entry access: overlap check and push happen under one lock.
        let mut entry = self.bookings.entry(booking.room_id.clone()).or_default();
        let conflict = entry.iter().any(|existing| {
            existing.status != BookingStatus::Cancelled
                && existing.check_in_date < booking.check_out_date
                && existing.check_out_date > booking.check_in_date
        });
        if conflict {
            return Err(StoreError::Conflict {
                room_id: booking.room_id.clone(),
            });
        }
        entry.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        let (room_id, idx) = self
            .find_booking(booking_id)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;

        let mut entry = self
            .bookings
            .get_mut(&room_id)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;
        let booking = entry
            .get_mut(idx)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;
        booking.status = status;
        booking.updated_at = chrono::Utc::now();
        Ok(booking.clone())
    }
}
