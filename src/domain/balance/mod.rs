use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::transaction::Transaction;

/// Running total that processed transactions are folded into.
#[derive(Debug, Default, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Balance {
    total: Decimal,
}

impl Balance {
    pub fn new(opening: Decimal) -> Self {
        Balance { total: opening }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Processes `tx` on `on` and adds its contribution, which is returned.
    pub fn apply(&mut self, tx: &mut Transaction, on: NaiveDate) -> Decimal {
        let contribution = tx.process_on(on);

        if !contribution.is_zero() {
            self.total += contribution;
            tracing::trace!(%on, %contribution, total = %self.total, "balance updated");
        }

        contribution
    }

    pub fn from_transactions<'a>(
        txns: impl IntoIterator<Item = &'a mut Transaction>,
        on: NaiveDate,
    ) -> Self {
        txns.into_iter().fold(Balance::default(), |mut balance, tx| {
            balance.apply(tx, on);
            balance
        })
    }
}
