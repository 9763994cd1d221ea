//! Activity tracking for charts

pub mod log;

pub use self::log::{ActivityLog, DayRecord, WeekdayActivity, HeatmapCell, HEATMAP_DAYS};
