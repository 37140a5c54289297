use std::error::Error;

use rusoto_ce::{GetCostAndUsageError, GetCostForecastError};
use rusoto_core::RusotoError;
use rusoto_organizations::ListAccountsError;
use rusoto_sns::PublishError;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum BillingNotifierError {
    NoneValue,
    ToPrimitive,
    ParseAmount(String),
    CostAndUsageError(RusotoError<GetCostAndUsageError>),
    CostForecastError(RusotoError<GetCostForecastError>),
    ListAccountsError(RusotoError<ListAccountsError>),
    PublishError(RusotoError<PublishError>),
}

impl Display for BillingNotifierError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            BillingNotifierError::NoneValue => write!(f, "Value is None"),
            BillingNotifierError::ToPrimitive => {
                write!(f, "Failed to convert bigDecimal to primitive")
            }
            BillingNotifierError::ParseAmount(ref raw) => {
                write!(f, "Failed to parse cost amount: {}", raw)
            }
            BillingNotifierError::CostAndUsageError(ref error) => std::fmt::Display::fmt(error, f),
            BillingNotifierError::CostForecastError(ref error) => std::fmt::Display::fmt(error, f),
            BillingNotifierError::ListAccountsError(ref error) => std::fmt::Display::fmt(error, f),
            BillingNotifierError::PublishError(ref error) => std::fmt::Display::fmt(error, f),
        }
    }
}

impl Error for BillingNotifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            BillingNotifierError::CostAndUsageError(ref error) => Some(error),
            BillingNotifierError::CostForecastError(ref error) => Some(error),
            BillingNotifierError::ListAccountsError(ref error) => Some(error),
            BillingNotifierError::PublishError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<GetCostAndUsageError>> for BillingNotifierError {
    fn from(e: RusotoError<GetCostAndUsageError>) -> BillingNotifierError {
        BillingNotifierError::CostAndUsageError(e)
    }
}

impl From<RusotoError<GetCostForecastError>> for BillingNotifierError {
    fn from(e: RusotoError<GetCostForecastError>) -> BillingNotifierError {
        BillingNotifierError::CostForecastError(e)
    }
}

impl From<RusotoError<ListAccountsError>> for BillingNotifierError {
    fn from(e: RusotoError<ListAccountsError>) -> BillingNotifierError {
        BillingNotifierError::ListAccountsError(e)
    }
}

impl From<RusotoError<PublishError>> for BillingNotifierError {
    fn from(e: RusotoError<PublishError>) -> BillingNotifierError {
        BillingNotifierError::PublishError(e)
    }
}
