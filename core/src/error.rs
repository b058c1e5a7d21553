use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Malformed day or month input. Never coerced to a nearby valid date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
