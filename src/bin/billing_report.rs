use billing_notifier::config::ReportConfig;
use billing_notifier::cost_explorer_client::{CostUsageClient, FetchCostUsage};
use billing_notifier::organizations_client::{AccountDirectoryClient, FetchAccountNames};
use billing_notifier::render::render_report;
use billing_notifier::report::BillingReport;
use billing_notifier::report_period::ReportPeriod;
use billing_notifier::sns_topic_client::{PublishReport, ReportTopicClient};

use chrono::Utc;
use lambda_runtime::{handler_fn, Context, Error};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info, warn};

#[derive(Serialize)]
pub struct ReportHandlerOutput {
    message: String,
    billing_period: String,
    total_cost: f64,
    message_id: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let config = ReportConfig::from_env()?;
    let cost_client = CostUsageClient::new();
    let directory_client = AccountDirectoryClient::new();
    let topic_client = ReportTopicClient::new(config.topic_arn.clone());

    let config_ref = &config;
    let cost_client_ref = &cost_client;
    let directory_client_ref = &directory_client;
    let topic_client_ref = &topic_client;
    lambda_runtime::run(handler_fn(move |event: Value, context: Context| async move {
        report_handler(
            config_ref,
            cost_client_ref,
            directory_client_ref,
            topic_client_ref,
            event,
            context,
        )
        .await
        .map_err(|handler_error| {
            error!("billing report generation failed: {}", handler_error);
            handler_error
        })
    }))
    .await?;
    Ok(())
}

async fn report_handler(
    config: &ReportConfig,
    cost_client: &impl FetchCostUsage,
    directory_client: &impl FetchAccountNames,
    topic_client: &impl PublishReport,
    _: Value,
    _: Context,
) -> Result<ReportHandlerOutput, Error> {
    info!("starting billing report generation");
    let now = Utc::now();
    let period = ReportPeriod::lookback(now, config.lookback_days);
    let forecast_window = ReportPeriod::forecast_window(now)?;
    let account_filter = config.account_ids.as_deref();

    let account_costs = cost_client.costs_by_account(&period, account_filter).await?;
    let service_costs = cost_client.costs_by_service(&period, account_filter).await?;
    let forecast = match cost_client.cost_forecast(&forecast_window).await {
        Ok(amount) => Some(amount),
        Err(error) => {
            warn!("could not retrieve cost forecast: {}", error);
            None
        }
    };
    let account_names = match directory_client.account_names().await {
        Ok(names) => names,
        Err(error) => {
            warn!("could not retrieve account names: {}", error);
            HashMap::new()
        }
    };

    let report = BillingReport::build(
        period,
        account_costs,
        service_costs,
        forecast,
        &account_names,
    )?;
    if report.accounts.is_empty() {
        warn!("no cost data available for billing period {}", report.period);
    }

    let message = render_report(&report);
    let message_id = topic_client.publish_report(&message).await?;
    info!(
        "billing report for {} published, message id {}",
        report.period, message_id
    );

    Ok(ReportHandlerOutput {
        message: "billing report generated and published".to_string(),
        billing_period: report.period.to_string(),
        total_cost: report.total_cost,
        message_id,
    })
}
