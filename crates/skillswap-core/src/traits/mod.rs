//! Collaborator trait seams.
//!
//! Every external system the subsystem touches is reached through one
//! of these traits so that tests can substitute in-memory fakes.

pub mod feed;
pub mod identity;
pub mod refresher;
pub mod storage;
