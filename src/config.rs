use anyhow::{Context, Result};
use reqwest::Url;
use std::env;

const REPORT_TOPIC_ARN_VAR: &str = "REPORT_TOPIC_ARN";
const LOOKBACK_DAYS_VAR: &str = "LOOKBACK_DAYS";
const ACCOUNT_ALLOW_LIST_VAR: &str = "ACCOUNT_ALLOW_LIST";
const SLACK_WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

#[derive(Debug, PartialEq)]
pub struct ReportConfig {
    pub topic_arn: String,
    pub lookback_days: u32,
    pub account_ids: Option<Vec<String>>,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let topic_arn = env::var(REPORT_TOPIC_ARN_VAR).with_context(|| {
            format!("{} is not set in environment variables", REPORT_TOPIC_ARN_VAR)
        })?;
        let lookback_days = parse_lookback_days(env::var(LOOKBACK_DAYS_VAR).ok().as_deref())?;
        let account_ids = env::var(ACCOUNT_ALLOW_LIST_VAR)
            .ok()
            .as_deref()
            .and_then(parse_account_allow_list);
        Ok(ReportConfig {
            topic_arn,
            lookback_days,
            account_ids,
        })
    }
}

#[derive(Debug)]
pub struct RelayConfig {
    pub webhook_url: Url,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        let raw = env::var(SLACK_WEBHOOK_URL_VAR).with_context(|| {
            format!("{} is not set in environment variables", SLACK_WEBHOOK_URL_VAR)
        })?;
        Ok(RelayConfig {
            webhook_url: parse_webhook_url(&raw)?,
        })
    }
}

fn parse_webhook_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim())
        .with_context(|| format!("{} is not a valid webhook URL: {:?}", SLACK_WEBHOOK_URL_VAR, raw))
}

fn parse_lookback_days(raw: Option<&str>) -> Result<u32> {
    match raw {
        Some(value) => value.trim().parse::<u32>().with_context(|| {
            format!(
                "{} is not a valid number of days: {:?}",
                LOOKBACK_DAYS_VAR, value
            )
        }),
        None => Ok(DEFAULT_LOOKBACK_DAYS),
    }
}

fn parse_account_allow_list(raw: &str) -> Option<Vec<String>> {
    let account_ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();
    if account_ids.is_empty() {
        None
    } else {
        Some(account_ids)
    }
}
