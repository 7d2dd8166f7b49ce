//! Personal-finance transaction model: one-off credits and debits, and
//! subscriptions that recur on a fixed day cadence inside a date window.
//!
//! The caller drives simulated time. Each day it asks a [`Subscription`]
//! whether it is due and folds what fires into a [`Balance`].

pub mod domain;
pub mod telemetry;

pub use domain::{
    balance::Balance,
    error::{Error, Result},
    interval::Interval,
    subscription::Subscription,
    transaction::Transaction,
};
