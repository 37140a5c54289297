use crate::error::BillingNotifierError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rusoto_ce::DateInterval;
use std::fmt;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, PartialEq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn lookback(now: DateTime<Utc>, days: u32) -> Self {
        let end = now.date_naive();
        let start = end - Duration::days(i64::from(days));
        ReportPeriod { start, end }
    }

    // Forecast requests must not start in the past, so the window covers the
    // remaining days of the current month.
    pub fn forecast_window(now: DateTime<Utc>) -> Result<Self, BillingNotifierError> {
        let today = now.date_naive();
        let start_of_next_month = Self::first_day_of_next_month(today.year(), today.month())?;
        Ok(ReportPeriod {
            start: today,
            end: start_of_next_month,
        })
    }

    pub fn as_date_interval(&self) -> DateInterval {
        DateInterval {
            start: self.start.format(DATE_FORMAT).to_string(),
            end: self.end.format(DATE_FORMAT).to_string(),
        }
    }

    fn first_day_of_next_month(year: i32, month: u32) -> Result<NaiveDate, BillingNotifierError> {
        let (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(BillingNotifierError::NoneValue)
    }
}

impl Display for ReportPeriod {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
