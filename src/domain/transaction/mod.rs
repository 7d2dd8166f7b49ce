use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

/// A value carrier whose sign depends on its kind.
///
/// Credits reduce a balance and debits increase it. Values are stored
/// unsigned; [`Transaction::process`] applies the sign.
#[derive(Debug, Serialize, Deserialize, Hash, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum Transaction {
    Plain { value: Decimal },
    Credit { value: Decimal },
    Debit { value: Decimal },
    Subscription(Subscription),
}

impl Transaction {
    pub fn plain(value: Decimal) -> Self {
        Transaction::Plain { value }
    }

    pub fn credit(value: Decimal) -> Self {
        Transaction::Credit { value }
    }

    pub fn debit(value: Decimal) -> Self {
        Transaction::Debit { value }
    }

    pub fn value(&self) -> Decimal {
        match self {
            Transaction::Plain { value }
            | Transaction::Credit { value }
            | Transaction::Debit { value } => *value,
            Transaction::Subscription(sub) => sub.value(),
        }
    }

    /// Signed contribution of this transaction to a balance.
    ///
    /// Subscriptions follow the credit convention here; whether one is
    /// actually due is decided by [`Transaction::process_on`].
    pub fn process(&self) -> Decimal {
        match self {
            Transaction::Plain { value } | Transaction::Debit { value } => *value,
            Transaction::Credit { value } => -*value,
            Transaction::Subscription(sub) => -sub.value(),
        }
    }

    /// Processes the transaction on a given date. One-off kinds ignore the
    /// date; a subscription contributes zero unless it is due.
    pub fn process_on(&mut self, date: NaiveDate) -> Decimal {
        match self {
            Transaction::Subscription(sub) => sub.process(date).unwrap_or(Decimal::ZERO),
            _ => self.process(),
        }
    }
}

impl From<Subscription> for Transaction {
    fn from(sub: Subscription) -> Self {
        Transaction::Subscription(sub)
    }
}
