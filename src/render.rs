use crate::report::BillingReport;

const REPORT_BANNER: &str = "==================================================\n\
                             ||          $$$$ AWS COST OPTIMIZATION REPORT $$$$         ||\n\
                             ==================================================\n\n";
const SECTION_RULE: &str =
    "----------------------------------------------------------------\n";

const TOP_ACCOUNT_ROWS: usize = 5;
const ACCOUNT_ID_WIDTH: usize = 12;
const ACCOUNT_NAME_WIDTH: usize = 12;

pub fn render_report(report: &BillingReport) -> String {
    let mut message = String::from(REPORT_BANNER);
    if report.accounts.is_empty() {
        message.push_str(&no_data_block(report));
        return message;
    }
    message.push_str(&summary_block(report));
    message.push_str(&account_table(report));
    message.push_str(&key_insights(report));
    message
}

fn summary_block(report: &BillingReport) -> String {
    let (icon, text) = trend_indicator(report.forecast.change_percent);
    let mut block = String::from("```\nSUMMARY\n");
    block.push_str(SECTION_RULE);
    block.push_str(&format!("Billing Period       | {}\n", report.period));
    block.push_str(&format!("Total AWS Cost       | ${:.2}\n", report.total_cost));
    block.push_str(&format!(
        "Forecast (Current)   | ${:.2} {} {}\n",
        report.forecast.amount, icon, text
    ));
    block.push_str(SECTION_RULE);
    block.push_str("```\n\n");
    block
}

fn no_data_block(report: &BillingReport) -> String {
    let mut block = String::from("```\nSUMMARY\n");
    block.push_str(SECTION_RULE);
    block.push_str(&format!("Billing Period       | {}\n", report.period));
    block.push_str("Total AWS Cost       | $0.00\n");
    block.push_str("No cost data was recorded for this billing period.\n");
    block.push_str(SECTION_RULE);
    block.push_str("```");
    block
}

fn account_table(report: &BillingReport) -> String {
    let mut table = String::from("*Top AWS Accounts:*\n```\n");
    table.push_str("  Account ID    |  Account Name  |  Cost (USD)  |  % of Total  \n");
    table.push_str(SECTION_RULE);
    for account in report.accounts.iter().take(TOP_ACCOUNT_ROWS) {
        table.push_str(&format!(
            " {:<12}  | {:<12} | ${:>10.2} | {:>10.1}%\n",
            clip(&account.account_id, ACCOUNT_ID_WIDTH),
            truncate_name(&account.account_name, ACCOUNT_NAME_WIDTH),
            account.cost,
            account.share,
        ));
    }
    table.push_str(SECTION_RULE);
    table.push_str("```\n\n");
    table
}

fn key_insights(report: &BillingReport) -> String {
    let mut block = String::from("*Key Insights:*\n```\n");
    block.push_str("METRIC                        | VALUE\n");
    block.push_str(SECTION_RULE);
    if let Some(highest) = report.accounts.first() {
        block.push_str(&format!(
            "Highest Spending Account    | {} - {}\n",
            highest.account_id, highest.account_name
        ));
        block.push_str(&format!(
            "                            | ${:.2}\n",
            highest.cost
        ));
    }
    if report.accounts.len() > 1 {
        if let Some(lowest) = report.accounts.last() {
            block.push_str(&format!(
                "Lowest Spending Account     | {} - {}\n",
                lowest.account_id, lowest.account_name
            ));
            block.push_str(&format!(
                "                            | ${:.2}\n",
                lowest.cost
            ));
        }
    }
    if let Some(top_service) = report.services.first() {
        block.push_str(&format!(
            "Highest Cost Service        | {}\n",
            top_service.service_name
        ));
        block.push_str(&format!(
            "                            | ${:.2} ({:.1}% of total)\n",
            top_service.cost, top_service.share
        ));
    }
    if report.forecast.change_percent != 0.0 {
        let direction = if report.forecast.change_percent > 0.0 {
            "increase"
        } else {
            "decrease"
        };
        block.push_str(&format!(
            "Month-over-Month Trend      | {:.1}% {}\n",
            report.forecast.change_percent.abs(),
            direction
        ));
    }
    block.push_str(SECTION_RULE);
    block.push_str("```");
    block
}

fn trend_indicator(change_percent: f64) -> (&'static str, String) {
    if change_percent > 0.0 {
        ("🔴", format!("(+{:.1}%)", change_percent))
    } else if change_percent < 0.0 {
        ("🟢", format!("({:.1}%)", change_percent))
    } else {
        ("⚪", "(0%)".to_string())
    }
}

fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let head: String = name.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

fn clip(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
