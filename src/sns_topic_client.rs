use async_trait::async_trait;
use rusoto_sns::{PublishInput, Sns, SnsClient};

use crate::error::BillingNotifierError;
use rusoto_core::Region;

const REPORT_SUBJECT: &str = "AWS Cost Optimization Report";

pub struct ReportTopicClient {
    client: SnsClient,
    topic_arn: String,
}

#[async_trait]
pub trait PublishReport {
    async fn publish_report(&self, message: &str) -> Result<String, BillingNotifierError>;
}

#[async_trait]
impl PublishReport for ReportTopicClient {
    async fn publish_report(&self, message: &str) -> Result<String, BillingNotifierError> {
        let response = self
            .client
            .publish(PublishInput {
                message: message.to_string(),
                subject: Some(REPORT_SUBJECT.to_string()),
                topic_arn: Some(self.topic_arn.clone()),
                ..PublishInput::default()
            })
            .await?;
        response.message_id.ok_or(BillingNotifierError::NoneValue)
    }
}

impl ReportTopicClient {
    pub fn new(topic_arn: String) -> Self {
        ReportTopicClient {
            client: SnsClient::new(Region::default()),
            topic_arn,
        }
    }

    pub fn new_with_client(client: SnsClient, topic_arn: String) -> Self {
        ReportTopicClient { client, topic_arn }
    }
}

#[cfg(test)]
mod tests {
    use crate::sns_topic_client::{PublishReport, ReportTopicClient};
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };
    use rusoto_sns::SnsClient;

    const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:111122223333:billing-reports";

    #[tokio::test]
    async fn test_publish_report() {
        let mock = SnsClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "publish.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = ReportTopicClient::new_with_client(mock, TOPIC_ARN.to_string());
        let result = client.publish_report("weekly billing report").await;

        assert_eq!(
            result.unwrap(),
            "94f20ce6-13c5-43a0-9a9e-ca52d816e90b".to_string()
        );
    }

    #[tokio::test]
    async fn test_publish_report_error() {
        let mock = SnsClient::new_with(
            MockRequestDispatcher::with_status(403).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "publish.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = ReportTopicClient::new_with_client(mock, TOPIC_ARN.to_string());
        let result = client.publish_report("weekly billing report").await;

        assert!(result.is_err());
    }
}
