//! Shared store and view models for the MetroCast dashboard.
//!
//! State flows one way: a view reads store state, an action dispatches an
//! adapter call on the service runtime, the completion message is applied
//! back to the store, and subscribers are notified. The rendering toolkit
//! sits on top of the view models in `views` and is not part of this crate.

pub mod app_services;
pub mod console;
pub mod error_mapping;
pub mod services;
pub mod store;
pub mod translations;
pub mod views;

pub use app_services::AppServices;
pub use store::{DashboardState, DashboardStore, MetricTab, SubscriptionId};
pub use translations::{strings, Language, Strings};
