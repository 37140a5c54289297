use crate::error::BillingNotifierError;
use crate::report_period::ReportPeriod;
use async_trait::async_trait;

use bigdecimal::BigDecimal;
use rusoto_ce::{
    CostExplorer, CostExplorerClient, DimensionValues, Expression, GetCostAndUsageRequest,
    GetCostForecastRequest, GroupDefinition, ResultByTime,
};
use rusoto_core::Region;
use std::str::FromStr;

const METRIC_UNBLENDED_COST: &str = "UnblendedCost";
const FORECAST_METRIC: &str = "AMORTIZED_COST";
const GRANULARITY_MONTHLY: &str = "MONTHLY";
const GROUP_TYPE_DIMENSION: &str = "DIMENSION";
const DIMENSION_LINKED_ACCOUNT: &str = "LINKED_ACCOUNT";
const DIMENSION_SERVICE: &str = "SERVICE";

#[derive(Debug, PartialEq)]
pub struct CostGroup {
    pub key: String,
    pub amount: BigDecimal,
    pub unit: String,
}

pub struct CostUsageClient {
    client: CostExplorerClient,
}

#[async_trait]
pub trait FetchCostUsage {
    async fn costs_by_account(
        &self,
        period: &ReportPeriod,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<CostGroup>, BillingNotifierError>;

    async fn costs_by_service(
        &self,
        period: &ReportPeriod,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<CostGroup>, BillingNotifierError>;

    async fn cost_forecast(
        &self,
        window: &ReportPeriod,
    ) -> Result<BigDecimal, BillingNotifierError>;
}

#[async_trait]
impl FetchCostUsage for CostUsageClient {
    async fn costs_by_account(
        &self,
        period: &ReportPeriod,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<CostGroup>, BillingNotifierError> {
        self.grouped_costs(period, DIMENSION_LINKED_ACCOUNT, account_ids)
            .await
    }

    async fn costs_by_service(
        &self,
        period: &ReportPeriod,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<CostGroup>, BillingNotifierError> {
        self.grouped_costs(period, DIMENSION_SERVICE, account_ids)
            .await
    }

    async fn cost_forecast(
        &self,
        window: &ReportPeriod,
    ) -> Result<BigDecimal, BillingNotifierError> {
        let response = self
            .client
            .get_cost_forecast(GetCostForecastRequest {
                filter: None,
                granularity: GRANULARITY_MONTHLY.to_string(),
                metric: FORECAST_METRIC.to_string(),
                prediction_interval_level: None,
                time_period: window.as_date_interval(),
            })
            .await?;
        let total = response.total.ok_or(BillingNotifierError::NoneValue)?;
        parse_amount(total.amount.as_deref().ok_or(BillingNotifierError::NoneValue)?)
    }
}

impl CostUsageClient {
    // Cost Explorer is only served out of us-east-1.
    pub fn new() -> Self {
        CostUsageClient {
            client: CostExplorerClient::new(Region::UsEast1),
        }
    }

    pub fn new_with_client(client: CostExplorerClient) -> Self {
        CostUsageClient { client }
    }

    async fn grouped_costs(
        &self,
        period: &ReportPeriod,
        dimension: &str,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<CostGroup>, BillingNotifierError> {
        let mut groups = Vec::<CostGroup>::new();
        let mut next_page_token = None;
        loop {
            let response = self
                .client
                .get_cost_and_usage(GetCostAndUsageRequest {
                    filter: account_filter(account_ids),
                    granularity: GRANULARITY_MONTHLY.to_string(),
                    group_by: Some(vec![GroupDefinition {
                        key: Some(dimension.to_string()),
                        type_: Some(GROUP_TYPE_DIMENSION.to_string()),
                    }]),
                    metrics: vec![METRIC_UNBLENDED_COST.to_string()],
                    next_page_token,
                    time_period: period.as_date_interval(),
                })
                .await?;

            collect_groups(&mut groups, response.results_by_time)?;
            next_page_token = response.next_page_token;
            if next_page_token.is_none() {
                break;
            }
        }
        Ok(groups)
    }
}

fn account_filter(account_ids: Option<&[String]>) -> Option<Expression> {
    account_ids.map(|ids| Expression {
        dimensions: Some(DimensionValues {
            key: Some(DIMENSION_LINKED_ACCOUNT.to_string()),
            match_options: None,
            values: Some(ids.to_vec()),
        }),
        ..Default::default()
    })
}

fn collect_groups(
    groups: &mut Vec<CostGroup>,
    results_by_time: Option<Vec<ResultByTime>>,
) -> Result<(), BillingNotifierError> {
    for result in results_by_time.unwrap_or_default() {
        for group in result.groups.unwrap_or_default() {
            let key = group
                .keys
                .as_ref()
                .and_then(|keys| keys.first())
                .cloned()
                .ok_or(BillingNotifierError::NoneValue)?;
            let metrics = group.metrics.ok_or(BillingNotifierError::NoneValue)?;
            let cost = metrics
                .get(METRIC_UNBLENDED_COST)
                .ok_or(BillingNotifierError::NoneValue)?;
            let amount =
                parse_amount(cost.amount.as_deref().ok_or(BillingNotifierError::NoneValue)?)?;
            let unit = cost.unit.clone().ok_or(BillingNotifierError::NoneValue)?;
            groups.push(CostGroup { key, amount, unit });
        }
    }
    Ok(())
}

fn parse_amount(raw: &str) -> Result<BigDecimal, BillingNotifierError> {
    BigDecimal::from_str(raw).map_err(|_| BillingNotifierError::ParseAmount(raw.to_string()))
}
