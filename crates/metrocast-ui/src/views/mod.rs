//! View models: pure projections of store state for the rendering layer.

pub mod chart;
pub mod current;
pub mod daily;
pub mod hourly;

pub use chart::{chart_series, ChartPoint};
pub use current::{current_conditions, CurrentConditions};
pub use daily::{daily_strip, DailyEntry};
pub use hourly::{hourly_strip, HourlyEntry};
