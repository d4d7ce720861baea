// Core records for rooms, bookings and the people acting on them.
// Shapes mirror the hosted backend's tables; statuses serialize to the lowercase
// strings the backend stores.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Staff-managed lifecycle of a physical room. Booking logic never writes this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: String,
    /// Nightly rate in currency minor-unit-free integer form (e.g. 18500).
    pub price_per_night: i64,
    pub status: RoomStatus,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub size: Option<String>,
    pub image: Option<String>,
}

/// Booking lifecycle. One-directional except for cancellation, which acts as the
/// soft delete and is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Pending, BookingStatus::Confirmed) => true,
            (BookingStatus::Pending, BookingStatus::Cancelled) => true,
            (BookingStatus::Confirmed, BookingStatus::Completed) => true,
            (BookingStatus::Confirmed, BookingStatus::Cancelled) => true,
            (BookingStatus::Pending, _)
            | (BookingStatus::Confirmed, _)
            | (BookingStatus::Completed, _)
            | (BookingStatus::Cancelled, _) => false,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move booking from {from:?} to {to:?}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_id: String,
    /// Half-open stay: the guest occupies `[check_in_date, check_out_date)`.
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    /// Total including tax, minor-unit-free integer.
    pub total_amount: i64,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Applies a status transition, rejecting anything outside the lifecycle.
    pub fn transition(&mut self, to: BookingStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(to) {
            return Err(InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Who is making a call; used by the engine for transition permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    Staff,
    Admin,
    Housekeeping,
    Pos,
}

impl UserRole {
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Admin)
    }
}
