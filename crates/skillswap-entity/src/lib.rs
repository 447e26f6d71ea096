//! # skillswap-entity
//!
//! Domain models for the notification delivery subsystem: remote and
//! local notification records, the tagged union over both, and the
//! pending-delivery record persisted by the durable queue.

pub mod notification;
pub mod pending;

pub use notification::kind::NotificationKind;
pub use notification::model::{
    LocalNotification, NewNotification, Notification, NotificationRecord, RecordOrigin,
};
pub use pending::PendingDelivery;
