//! Notification entity models.

pub mod kind;
pub mod model;
