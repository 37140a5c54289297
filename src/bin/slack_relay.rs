use billing_notifier::config::RelayConfig;
use billing_notifier::webhook::SlackWebhookClient;

use lambda_runtime::{handler_fn, Context, Error};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsNotification,
}

#[derive(Debug, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Serialize)]
pub struct RelayHandlerOutput {
    delivered: usize,
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

    // A missing or malformed webhook URL should abort here, before the
    // runtime starts polling for events.
    let config = RelayConfig::from_env()?;
    let webhook_client = SlackWebhookClient::from_config(&config)?;

    let webhook_client_ref = &webhook_client;
    lambda_runtime::run(handler_fn(
        move |event: SnsEvent, context: Context| async move {
            relay_handler(webhook_client_ref, event, context).await
        },
    ))
    .await?;
    Ok(())
}

async fn relay_handler(
    webhook_client: &SlackWebhookClient,
    event: SnsEvent,
    _: Context,
) -> Result<RelayHandlerOutput, Error> {
    let mut delivered = 0;
    for record in event.records {
        info!("relaying report message to slack webhook");
        if let Err(error) = webhook_client.post_text(&record.sns.message).await {
            error!("failed to deliver report to slack webhook: {:#}", error);
            return Err(error.into());
        }
        delivered += 1;
    }
    info!("delivered {} report message(s) to slack webhook", delivered);
    Ok(RelayHandlerOutput { delivered })
}
