use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    interval::Interval,
};

/// A recurring credit, active on `[start_date, end_date)`.
///
/// The caller owns the subscription and asks once per simulated day whether it
/// is due. The first firing is measured from `start_date`, later ones from the
/// last date it fired.
#[derive(Debug, Serialize, Deserialize, Hash, PartialEq, Eq, Clone)]
#[serde(try_from = "SubscriptionFields")]
pub struct Subscription {
    value: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interval: Interval,
    last_execution_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct SubscriptionFields {
    value: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interval: Interval,
    #[serde(default)]
    last_execution_date: Option<NaiveDate>,
}

impl Subscription {
    pub fn new(
        value: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<Self> {
        if end_date <= start_date {
            return Err(Error::EmptyWindow {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Subscription {
            value,
            start_date,
            end_date,
            interval,
            last_execution_date: None,
        })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn last_execution_date(&self) -> Option<NaiveDate> {
        self.last_execution_date
    }

    pub fn is_valid(&self, current_date: NaiveDate) -> bool {
        self.start_date <= current_date && current_date < self.end_date
    }

    pub fn is_due(&self, current_date: NaiveDate) -> bool {
        self.is_valid(current_date)
            && current_date
                .signed_duration_since(self.baseline())
                .num_days()
                >= self.interval.days()
    }

    /// Fires the subscription if it is due on `current_date`, returning the
    /// credited (negative) amount. State is left untouched when not due.
    pub fn process(&mut self, current_date: NaiveDate) -> Option<Decimal> {
        if !self.is_due(current_date) {
            return None;
        }

        self.last_execution_date = Some(current_date);
        tracing::debug!(
            %current_date,
            interval = %self.interval,
            value = %self.value,
            "subscription fired"
        );

        Some(-self.value)
    }

    /// Earliest date the subscription can fire next, if still inside the window.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.baseline()
            .checked_add_days(self.cadence())
            .filter(|date| *date < self.end_date)
    }

    /// Dates on which a daily driver would fire this subscription from its
    /// current state onwards, without mutating it.
    pub fn schedule(&self) -> impl Iterator<Item = NaiveDate> {
        let step = self.cadence();
        let end_date = self.end_date;

        itertools::iterate(self.next_due_date(), move |date| {
            date.and_then(|date| date.checked_add_days(step))
        })
        .map_while(move |date| date.filter(|date| *date < end_date))
    }

    fn baseline(&self) -> NaiveDate {
        self.last_execution_date.unwrap_or(self.start_date)
    }

    fn cadence(&self) -> Days {
        Days::new(self.interval.days().unsigned_abs())
    }
}

impl TryFrom<SubscriptionFields> for Subscription {
    type Error = Error;

    fn try_from(fields: SubscriptionFields) -> Result<Self> {
        let mut subscription = Subscription::new(
            fields.value,
            fields.start_date,
            fields.end_date,
            fields.interval,
        )?;

        if let Some(date) = fields.last_execution_date {
            if !subscription.is_valid(date) {
                return Err(Error::ExecutionOutsideWindow { date });
            }
            subscription.last_execution_date = Some(date);
        }

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_january() -> Subscription {
        Subscription::new(
            dec!(10),
            date(2024, 1, 1),
            date(2024, 2, 1),
            Interval::Monthly,
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_window() {
        let err = Subscription::new(
            dec!(10),
            date(2024, 2, 1),
            date(2024, 2, 1),
            Interval::Weekly,
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::EmptyWindow {
                start: date(2024, 2, 1),
                end: date(2024, 2, 1),
            }
        );
    }

    #[test]
    fn window_is_half_open() {
        let sub = monthly_january();

        assert!(!sub.is_valid(date(2023, 12, 31)));
        assert!(sub.is_valid(date(2024, 1, 1)));
        assert!(sub.is_valid(date(2024, 1, 31)));
        assert!(!sub.is_valid(date(2024, 2, 1)));
    }

    #[test]
    fn not_due_outside_window_or_before_cadence() {
        let sub = monthly_january();

        assert!(!sub.is_due(date(2023, 12, 31)));
        assert!(!sub.is_due(date(2024, 2, 1)));
        assert!(!sub.is_due(date(2024, 1, 1)));
        // 30 days in, the last day of the window
        assert!(!sub.is_due(date(2024, 1, 31)));
    }

    #[test]
    fn monthly_due_after_thirty_one_days() {
        let sub = Subscription::new(
            dec!(10),
            date(2024, 1, 1),
            date(2024, 6, 1),
            Interval::Monthly,
        )
        .unwrap();

        assert!(!sub.is_due(date(2024, 1, 31)));
        assert!(sub.is_due(date(2024, 2, 1)));
        assert!(sub.is_due(date(2024, 3, 15)));
    }

    #[test]
    fn process_records_execution_and_moves_baseline() {
        let mut sub = Subscription::new(
            dec!(10),
            date(2024, 1, 1),
            date(2024, 6, 1),
            Interval::Monthly,
        )
        .unwrap();

        assert_eq!(sub.process(date(2024, 1, 20)), None);
        assert_eq!(sub.last_execution_date(), None);

        assert_eq!(sub.process(date(2024, 2, 1)), Some(dec!(-10)));
        assert_eq!(sub.last_execution_date(), Some(date(2024, 2, 1)));

        // measured from the last firing now, not from the start date
        assert!(!sub.is_due(date(2024, 3, 1)));
        assert!(sub.is_due(date(2024, 3, 3)));
    }

    #[test]
    fn weekly_cadence() {
        let mut sub = Subscription::new(
            dec!(4.99),
            date(2024, 1, 1),
            date(2024, 12, 31),
            Interval::Weekly,
        )
        .unwrap();
        sub.process(date(2024, 1, 8)).unwrap();

        assert!(!sub.is_due(date(2024, 1, 14)));
        assert!(sub.is_due(date(2024, 1, 15)));
    }

    #[test]
    fn next_due_date_stays_inside_window() {
        let sub = monthly_january();
        assert_eq!(sub.next_due_date(), None);

        let mut sub = Subscription::new(
            dec!(10),
            date(2024, 1, 1),
            date(2024, 3, 1),
            Interval::Monthly,
        )
        .unwrap();
        assert_eq!(sub.next_due_date(), Some(date(2024, 2, 1)));

        sub.process(date(2024, 2, 1)).unwrap();
        assert_eq!(sub.next_due_date(), None);
    }

    #[test]
    fn schedule_matches_daily_processing() {
        let mut sub = Subscription::new(
            dec!(12),
            date(2024, 1, 1),
            date(2024, 4, 1),
            Interval::Weekly,
        )
        .unwrap();
        let planned: Vec<_> = sub.schedule().collect();

        let fired: Vec<_> = sub
            .start_date()
            .iter_days()
            .take_while(|day| *day < date(2024, 4, 1))
            .filter(|day| sub.process(*day).is_some())
            .collect();

        assert_eq!(planned, fired);
        assert_eq!(planned.len(), 12);
        assert_eq!(planned.first(), Some(&date(2024, 1, 8)));
        assert_eq!(sub.schedule().next(), None);
    }

    #[test]
    fn yearly_subscription_never_fires_in_short_window() {
        let sub = Subscription::new(
            dec!(99),
            date(2024, 1, 1),
            date(2024, 12, 31),
            Interval::Yearly,
        )
        .unwrap();

        assert_eq!(sub.schedule().count(), 0);
        assert!(!sub.is_due(date(2024, 12, 30)));
    }

    #[test]
    fn deserialization_validates_fields() {
        let sub: Subscription = serde_json::from_str(
            r#"{"value":"10","start_date":"2024-01-01","end_date":"2024-06-01","interval":"MONTHLY","last_execution_date":"2024-02-01"}"#,
        )
        .unwrap();
        assert_eq!(sub.last_execution_date(), Some(date(2024, 2, 1)));

        let empty = serde_json::from_str::<Subscription>(
            r#"{"value":"10","start_date":"2024-06-01","end_date":"2024-01-01","interval":"MONTHLY"}"#,
        );
        assert!(empty.is_err());

        let outside = serde_json::from_str::<Subscription>(
            r#"{"value":"10","start_date":"2024-01-01","end_date":"2024-06-01","interval":"MONTHLY","last_execution_date":"2024-07-01"}"#,
        );
        assert!(outside.is_err());
    }
}
