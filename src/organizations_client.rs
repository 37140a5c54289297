use async_trait::async_trait;
use rusoto_organizations::{ListAccountsRequest, Organizations, OrganizationsClient};

use crate::error::BillingNotifierError;
use rusoto_core::Region;
use std::collections::HashMap;

const LIST_ACCOUNTS_PAGE_SIZE: i64 = 20;

pub struct AccountDirectoryClient {
    client: OrganizationsClient,
}

#[async_trait]
pub trait FetchAccountNames {
    async fn account_names(&self) -> Result<HashMap<String, String>, BillingNotifierError>;
}

#[async_trait]
impl FetchAccountNames for AccountDirectoryClient {
    async fn account_names(&self) -> Result<HashMap<String, String>, BillingNotifierError> {
        let mut names = HashMap::new();
        let mut next_token = None;
        loop {
            let response = self
                .client
                .list_accounts(ListAccountsRequest {
                    max_results: Some(LIST_ACCOUNTS_PAGE_SIZE),
                    next_token,
                })
                .await?;

            for account in response.accounts.unwrap_or_default() {
                if let (Some(id), Some(name)) = (account.id, account.name) {
                    names.insert(id, name);
                }
            }
            next_token = response.next_token;
            if next_token.is_none() {
                break;
            }
        }
        Ok(names)
    }
}

impl AccountDirectoryClient {
    // Organizations is a global service behind the us-east-1 endpoint.
    pub fn new() -> Self {
        AccountDirectoryClient {
            client: OrganizationsClient::new(Region::UsEast1),
        }
    }

    pub fn new_with_client(client: OrganizationsClient) -> Self {
        AccountDirectoryClient { client }
    }
}

#[cfg(test)]
mod tests {
    use crate::organizations_client::{AccountDirectoryClient, FetchAccountNames};
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader,
        MultipleMockRequestDispatcher, ReadMockResponse,
    };
    use rusoto_organizations::OrganizationsClient;

    #[tokio::test]
    async fn test_account_names() {
        let mock = OrganizationsClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "list_accounts.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = AccountDirectoryClient::new_with_client(mock);
        let result = client.account_names().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get("111122223333"),
            Some(&"platform-prod".to_string())
        );
        assert_eq!(result.get("444455556666"), Some(&"data-lake".to_string()));
    }

    #[tokio::test]
    async fn test_account_names_follows_pagination() {
        let mock = OrganizationsClient::new_with(
            MultipleMockRequestDispatcher::new(vec![
                MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                    "test_resources/valid",
                    "list_accounts_page_1.json",
                )),
                MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                    "test_resources/valid",
                    "list_accounts_page_2.json",
                )),
            ]),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = AccountDirectoryClient::new_with_client(mock);
        let result = client.account_names().await.unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(
            result.get("777788889999"),
            Some(&"sandbox".to_string())
        );
    }

    #[tokio::test]
    async fn test_account_names_error() {
        let mock = OrganizationsClient::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "list_accounts.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = AccountDirectoryClient::new_with_client(mock);
        let result = client.account_names().await;

        assert!(result.is_err());
    }
}
