//! Event name constants.
//!
//! Subscribers register handlers against these names; two entries
//! (`newBooking`, `bookingCancelled`) predate the snake_case convention
//! and are kept verbatim for compatibility.

/// Simulated channel came up.
pub const CONNECT: &str = "connect";
/// Simulated channel went down.
pub const DISCONNECT: &str = "disconnect";
/// A new slot was created.
pub const SLOT_CREATED: &str = "slot_created";
/// A slot was edited.
pub const SLOT_UPDATED: &str = "slot_updated";
/// A slot was removed.
pub const SLOT_DELETED: &str = "slot_deleted";
/// A manager submitted a slot for approval.
pub const TENANT_SLOT_CREATED: &str = "tenant_slot_created";
/// An admin approved a pending slot.
pub const SLOT_APPROVED: &str = "slot_approved";
/// An admin rejected a pending slot.
pub const SLOT_REJECTED: &str = "slot_rejected";
/// A booking was created (structured payload).
pub const NEW_BOOKING: &str = "new_booking";
/// A booking was created (legacy full-record payload).
pub const NEW_BOOKING_LEGACY: &str = "newBooking";
/// A booking was cancelled.
pub const BOOKING_CANCELLED: &str = "bookingCancelled";
/// An inbox message was queued for a user.
pub const NOTIFICATION: &str = "notification";
/// Security logged a vehicle entering a slot.
pub const VEHICLE_ENTRY: &str = "vehicle_entry";
/// Security logged a vehicle leaving a slot.
pub const VEHICLE_EXIT: &str = "vehicle_exit";
/// Security raised an alert.
pub const SECURITY_ALERT: &str = "security_alert";

/// Every event name, in catalog order. For subscribers that watch the
/// whole stream, such as the demo logger.
pub const ALL: [&str; 15] = [
    CONNECT,
    DISCONNECT,
    SLOT_CREATED,
    SLOT_UPDATED,
    SLOT_DELETED,
    TENANT_SLOT_CREATED,
    SLOT_APPROVED,
    SLOT_REJECTED,
    NEW_BOOKING,
    NEW_BOOKING_LEGACY,
    BOOKING_CANCELLED,
    NOTIFICATION,
    VEHICLE_ENTRY,
    VEHICLE_EXIT,
    SECURITY_ALERT,
];
