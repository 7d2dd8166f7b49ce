use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// How often a subscription fires.
///
/// The cadence is a fixed day count, not a calendar step: a monthly
/// subscription fires 31 days after its baseline regardless of month length.
#[derive(Debug, Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interval {
    Weekly,
    Monthly,
    Yearly,
}

impl Interval {
    pub const fn days(self) -> i64 {
        match self {
            Interval::Weekly => 7,
            Interval::Monthly => 31,
            Interval::Yearly => 365,
        }
    }

    /// Legacy lookup: anything that is not weekly or monthly is treated as
    /// yearly, including typos.
    ///
    /// Prefer [`str::parse`], which rejects unknown names.
    pub fn lenient(name: &str) -> Interval {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unrecognised interval, falling back to yearly");
            Interval::Yearly
        })
    }

    fn name(self) -> &'static str {
        match self {
            Interval::Weekly => "WEEKLY",
            Interval::Monthly => "MONTHLY",
            Interval::Yearly => "YEARLY",
        }
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Interval::Weekly, Interval::Monthly, Interval::Yearly]
            .into_iter()
            .find(|interval| interval.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownInterval(s.to_owned()))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
