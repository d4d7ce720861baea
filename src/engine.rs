// Booking workflow: validate dates, check availability, price the stay, insert a
// pending record. Also the staff-facing status transitions for the dashboard.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::availability::{is_range_available, DateRange, InvalidRange};
use crate::config::EngineConfig;
use crate::domain::{Booking, BookingStatus, InvalidTransition};
use crate::pricing::Quote;
use crate::session::SessionContext;
use crate::store::{BookingStore, StoreError};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    #[error("check-in {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("room {room_id} is unavailable for the selected dates")]
    RoomUnavailable { room_id: String },

    #[error("{role:?} is not allowed to {action}")]
    Forbidden {
        role: crate::domain::UserRole,
        action: &'static str,
    },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Guest-supplied booking request, as produced by the booking form.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    pub special_requests: Option<String>,
}

pub struct BookingEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: BookingStore> BookingEngine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Availability for the calendar widget. A failed read is never treated as
    /// available; the store error propagates.
    pub async fn check_availability(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, BookingError> {
        let candidate = DateRange::new(check_in, check_out)?;
        let bookings = self
            .store
            .list_bookings_for_room(room_id, Some(candidate))
            .await?;
        Ok(is_range_available(room_id, candidate, &bookings))
    }

    /// Prices a stay for the booking-form summary without writing anything.
    pub async fn quote(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Quote, BookingError> {
        let range = DateRange::new(check_in, check_out)?;
        let room = self.store.get_room(room_id).await?;
        Ok(Quote::compute(
            room.price_per_night,
            range,
            self.config.tax_rate,
        ))
    }

    /// Creates a pending booking. `today` is caller-supplied so past-date
    /// validation is testable and timezone decisions stay with the caller.
    ///
    /// The pre-insert availability check gives the user an early answer, but the
    /// store's conditional insert is what actually guards against a concurrent
    /// submission landing between the read and the write.
    pub async fn create_booking(
        &self,
        ctx: &SessionContext,
        request: NewBooking,
        today: NaiveDate,
    ) -> Result<Booking, BookingError> {
        let range = DateRange::new(request.check_in_date, request.check_out_date)?;
        if request.check_in_date < today {
            return Err(BookingError::DateInPast(request.check_in_date));
        }

        debug!(
            correlation_id = %ctx.correlation_id,
            room_id = %request.room_id,
            %range,
            "checking availability"
        );
        let bookings = self
            .store
            .list_bookings_for_room(&request.room_id, Some(range))
            .await?;
        if !is_range_available(&request.room_id, range, &bookings) {
            return Err(BookingError::RoomUnavailable {
                room_id: request.room_id,
            });
        }

        let room = self.store.get_room(&request.room_id).await?;
        let quote = Quote::compute(room.price_per_night, range, self.config.tax_rate);

        let now = Utc::now();
        let booking = Booking {
            id: format!("bk-{:08x}", rand::random::<u32>()),
            room_id: request.room_id,
            guest_id: ctx.user_id.clone(),
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            guest_count: request.guest_count,
            total_amount: quote.total,
            status: BookingStatus::Pending,
            special_requests: request.special_requests,
            created_at: now,
            updated_at: now,
        };

        match self.store.insert_booking(booking).await {
            Ok(booking) => {
                info!(
                    correlation_id = %ctx.correlation_id,
                    booking_id = %booking.id,
                    room_id = %booking.room_id,
                    total = booking.total_amount,
                    "booking created"
                );
                Ok(booking)
            }
            Err(StoreError::Conflict { room_id }) => {
                // Lost the race: another submission landed after our read.
                warn!(
                    correlation_id = %ctx.correlation_id,
                    room_id = %room_id,
                    "availability check was stale, insert rejected"
                );
                Err(BookingError::RoomUnavailable { room_id })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Staff/admin promote bookings; cancellation is also open to the owning
    /// guest. Lifecycle rules themselves live in the domain transition table.
    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let current = self.store.get_booking(booking_id).await?;

        let permitted = match status {
            BookingStatus::Confirmed | BookingStatus::Completed => ctx.role.is_staff(),
            BookingStatus::Cancelled => ctx.role.is_staff() || current.guest_id == ctx.user_id,
            BookingStatus::Pending => false,
        };
        if !permitted {
            return Err(BookingError::Forbidden {
                role: ctx.role,
                action: "change booking status",
            });
        }

        if !current.status.can_transition_to(status) {
            return Err(InvalidTransition {
                from: current.status,
                to: status,
            }
            .into());
        }

        let updated = self.store.update_booking_status(booking_id, status).await?;
        info!(
            correlation_id = %ctx.correlation_id,
            booking_id = %updated.id,
            status = updated.status.as_str(),
            "booking status updated"
        );
        Ok(updated)
    }
}
