use crate::cost_explorer_client::CostGroup;
use crate::error::BillingNotifierError;
use crate::report_period::ReportPeriod;
use bigdecimal::{BigDecimal, ToPrimitive};
use std::collections::HashMap;
use std::ops::{Add, Div};

pub const DEFAULT_CURRENCY: &str = "USD";
const UNKNOWN_ACCOUNT_NAME: &str = "Unknown";

#[derive(Debug, PartialEq)]
pub struct AccountCost {
    pub account_id: String,
    pub account_name: String,
    pub cost: f64,
    pub share: f64,
}

#[derive(Debug, PartialEq)]
pub struct ServiceCost {
    pub service_name: String,
    pub cost: f64,
    pub share: f64,
}

#[derive(Debug, PartialEq)]
pub struct CostForecast {
    pub amount: f64,
    pub change_percent: f64,
}

impl Default for CostForecast {
    fn default() -> Self {
        Self {
            amount: 0.0,
            change_percent: 0.0,
        }
    }
}

impl CostForecast {
    fn versus_actual(
        amount: &BigDecimal,
        actual_total: &BigDecimal,
    ) -> Result<Self, BillingNotifierError> {
        let projected = to_currency(amount)?;
        if actual_total <= &BigDecimal::from(0) {
            return Ok(CostForecast {
                amount: projected,
                change_percent: 0.0,
            });
        }
        let actual = to_currency(actual_total)?;
        Ok(CostForecast {
            amount: projected,
            change_percent: ((projected - actual) / actual) * 100.0,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct BillingReport {
    pub period: ReportPeriod,
    pub currency: String,
    pub total_cost: f64,
    pub forecast: CostForecast,
    pub accounts: Vec<AccountCost>,
    pub services: Vec<ServiceCost>,
}

impl BillingReport {
    pub fn build(
        period: ReportPeriod,
        mut account_groups: Vec<CostGroup>,
        mut service_groups: Vec<CostGroup>,
        forecast_amount: Option<BigDecimal>,
        account_names: &HashMap<String, String>,
    ) -> Result<Self, BillingNotifierError> {
        account_groups.sort_by(|left, right| right.amount.cmp(&left.amount));
        service_groups.sort_by(|left, right| right.amount.cmp(&left.amount));

        let currency = account_groups
            .first()
            .map(|group| group.unit.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let total = account_groups
            .iter()
            .fold(BigDecimal::from(0), |sum, group| sum.add(&group.amount));

        let accounts = account_groups
            .iter()
            .map(|group| {
                Ok(AccountCost {
                    account_id: group.key.clone(),
                    account_name: account_names
                        .get(&group.key)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_ACCOUNT_NAME.to_string()),
                    cost: to_currency(&group.amount)?,
                    share: share_of_total(&group.amount, &total)?,
                })
            })
            .collect::<Result<Vec<AccountCost>, BillingNotifierError>>()?;

        let services = service_groups
            .iter()
            .map(|group| {
                Ok(ServiceCost {
                    service_name: group.key.clone(),
                    cost: to_currency(&group.amount)?,
                    share: share_of_total(&group.amount, &total)?,
                })
            })
            .collect::<Result<Vec<ServiceCost>, BillingNotifierError>>()?;

        let forecast = match forecast_amount {
            Some(amount) => CostForecast::versus_actual(&amount, &total)?,
            None => CostForecast::default(),
        };

        Ok(BillingReport {
            period,
            currency,
            total_cost: to_currency(&total)?,
            forecast,
            accounts,
            services,
        })
    }
}

fn to_currency(amount: &BigDecimal) -> Result<f64, BillingNotifierError> {
    amount.to_f64().ok_or(BillingNotifierError::ToPrimitive)
}

fn share_of_total(
    amount: &BigDecimal,
    total: &BigDecimal,
) -> Result<f64, BillingNotifierError> {
    if total <= &BigDecimal::from(0) {
        return Ok(0.0);
    }
    amount
        .div(total)
        .to_f64()
        .map(|share| share * 100.0)
        .ok_or(BillingNotifierError::ToPrimitive)
}

#[cfg(test)]
mod tests {
    use crate::cost_explorer_client::CostGroup;
    use crate::report::{BillingReport, CostForecast};
    use crate::report_period::ReportPeriod;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn period() -> ReportPeriod {
        ReportPeriod {
            start: NaiveDate::from_ymd_opt(2026, 7, 30).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        }
    }

    fn group(key: &str, amount: &str) -> CostGroup {
        CostGroup {
            key: key.to_string(),
            amount: BigDecimal::from_str(amount).unwrap(),
            unit: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_sorts_accounts_descending() {
        let report = BillingReport::build(
            period(),
            vec![
                group("777788889999", "30.36"),
                group("111122223333", "360.70"),
                group("444455556666", "360.30"),
            ],
            vec![],
            None,
            &HashMap::new(),
        )
        .unwrap();

        let ids: Vec<&str> = report
            .accounts
            .iter()
            .map(|account| account.account_id.as_str())
            .collect();
        assert_eq!(ids, ["111122223333", "444455556666", "777788889999"]);
        assert!((report.total_cost - 751.36).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_build_keeps_order_of_tied_accounts() {
        let report = BillingReport::build(
            period(),
            vec![
                group("222233334444", "50.00"),
                group("111122223333", "50.00"),
                group("555566667777", "80.00"),
            ],
            vec![],
            None,
            &HashMap::new(),
        )
        .unwrap();

        let ids: Vec<&str> = report
            .accounts
            .iter()
            .map(|account| account.account_id.as_str())
            .collect();
        assert_eq!(ids, ["555566667777", "222233334444", "111122223333"]);
    }

    #[tokio::test]
    async fn test_shares_sum_to_one_hundred() {
        let report = BillingReport::build(
            period(),
            vec![
                group("111122223333", "360.70"),
                group("444455556666", "360.30"),
                group("777788889999", "30.36"),
            ],
            vec![],
            None,
            &HashMap::new(),
        )
        .unwrap();

        let share_sum: f64 = report.accounts.iter().map(|account| account.share).sum();
        assert!((share_sum - 100.0).abs() < 0.1);
        assert!((report.accounts[0].share - 48.0).abs() < 0.05);
    }

    #[tokio::test]
    async fn test_account_names_resolved_from_directory() {
        let mut names = HashMap::new();
        names.insert("111122223333".to_string(), "platform-prod".to_string());

        let report = BillingReport::build(
            period(),
            vec![group("111122223333", "12.00"), group("444455556666", "6.00")],
            vec![],
            None,
            &names,
        )
        .unwrap();

        assert_eq!(report.accounts[0].account_name, "platform-prod");
        assert_eq!(report.accounts[1].account_name, "Unknown");
    }

    #[tokio::test]
    async fn test_forecast_change_versus_actual() {
        let report = BillingReport::build(
            period(),
            vec![group("111122223333", "756.86")],
            vec![],
            Some(BigDecimal::from_str("3651.09").unwrap()),
            &HashMap::new(),
        )
        .unwrap();

        assert!((report.forecast.amount - 3651.09).abs() < 1e-9);
        assert!((report.forecast.change_percent - 382.4).abs() < 0.05);
    }

    #[tokio::test]
    async fn test_forecast_defaults_to_zero_when_missing() {
        let report = BillingReport::build(
            period(),
            vec![group("111122223333", "10.00")],
            vec![],
            None,
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(report.forecast, CostForecast::default());
    }

    #[tokio::test]
    async fn test_empty_breakdown_builds_zero_report() {
        let report =
            BillingReport::build(period(), vec![], vec![], None, &HashMap::new()).unwrap();

        assert!(report.accounts.is_empty());
        assert!(report.services.is_empty());
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.currency, "USD");
    }

    #[tokio::test]
    async fn test_shares_are_zero_when_total_is_zero() {
        let report = BillingReport::build(
            period(),
            vec![group("111122223333", "0.00"), group("444455556666", "0.00")],
            vec![group("AWS Lambda", "0.00")],
            Some(BigDecimal::from_str("5.00").unwrap()),
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(report.accounts[0].share, 0.0);
        assert_eq!(report.services[0].share, 0.0);
        assert_eq!(report.forecast.change_percent, 0.0);
    }
}
