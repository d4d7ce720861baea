// Booking core for the resort: availability checking, stay pricing and the
// create-booking workflow, backed by a pluggable booking store.

pub mod availability;
pub mod config;
pub mod domain;
pub mod engine;
pub mod pricing;
pub mod session;
pub mod store;

// Re-export key types for convenience
pub use availability::{check_dates_available, is_range_available, DateRange, InvalidRange};
pub use config::{ConfigError, EngineConfig, Settings, DEFAULT_TAX_RATE};
pub use domain::{Booking, BookingStatus, InvalidTransition, Room, RoomStatus, UserRole};
pub use engine::{BookingEngine, BookingError, NewBooking};
pub use pricing::Quote;
pub use session::SessionContext;
pub use store::{BookingStore, MemoryBookingStore, StoreError};
