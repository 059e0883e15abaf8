use chrono::NaiveDate;

/// Source of "now" for rules that depend on the calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Seconds since the unix epoch.
    fn now(&self) -> i64;
}
