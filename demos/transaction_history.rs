mod common;

use text2pay::{GetTransactionHistory, TransactionHistoryOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = common::client_from_env()?;
    let request = GetTransactionHistory::new(
        common::required_env("TEXT2PAY_CAMPAIGN_ID")?,
        common::required_env("TEXT2PAY_FROM_DATE")?,
        common::required_env("TEXT2PAY_TO_DATE")?,
        TransactionHistoryOptions::default(),
    )?;

    let history = client.execute(request).await?;
    println!("{} transaction(s)", history.transactions.len());
    for row in &history.transactions {
        let line = row
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }

    Ok(())
}
