use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time. Visibility decisions depend on "today".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
