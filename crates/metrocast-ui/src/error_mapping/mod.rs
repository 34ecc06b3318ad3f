//! Conversions from UI service errors into the core error hierarchy.
//!
//! Hosts that surface errors through `metrocast_core::AppError` get its
//! `user_message()` text for free.

pub mod forecast;
pub mod history;
pub mod metrics;
