use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("subscription window is empty: end date {end} is not after start date {start}")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },
    #[error("unknown subscription interval {0:?}")]
    UnknownInterval(String),
    #[error("last execution date {date} falls outside the subscription window")]
    ExecutionOutsideWindow { date: NaiveDate },
}

pub type Result<T> = std::result::Result<T, Error>;
