//! # skillswap-core
//!
//! Core crate for the SkillSwap notification delivery subsystem.
//! Contains collaborator traits, configuration schemas, typed
//! identifiers, the internal event bus, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SkillSwap crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
