mod common;

use text2pay::{
    CheckTransactionStatus, InitiateTransaction, InitiateTransactionOptions, Msisdn, OptinMethod,
    Text2PayError, VerifyTransaction,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = common::client_from_env()?;
    let service_id = common::required_env("TEXT2PAY_SERVICE_ID")?;
    let msisdn = Msisdn::parse(None, common::required_env("TEXT2PAY_MSISDN")?)?;

    let request = InitiateTransaction::new(
        service_id.as_str(),
        msisdn,
        "demo-consumer",
        100,
        InitiateTransactionOptions {
            transaction_ref: std::env::var("TEXT2PAY_TRANS_REF").ok(),
            ..Default::default()
        },
    )?;

    let started = match client.execute(request).await {
        Ok(started) => started,
        Err(err @ Text2PayError::Api { .. }) => {
            eprintln!("rejected by the service (code {}): {err}", err.code());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    println!(
        "group {} with {} billing message(s), opt-in via {}",
        started.transaction_group_id, started.total_transactions, started.optin_method
    );
    if started.optin_method_kind() == Some(OptinMethod::OffPortal) {
        if let Some(url) = &started.offportal_url {
            println!("redirect the subscriber to {url}");
        }
    }

    let verified = client
        .execute(VerifyTransaction::for_group(
            service_id.as_str(),
            started.transaction_group_id.as_str(),
        )?)
        .await?;
    for transaction in &verified.transactions {
        println!(
            "transaction {} confirmation: {}",
            transaction.transaction_id, transaction.confirmation
        );
    }

    let status = client
        .execute(CheckTransactionStatus::for_group(
            started.transaction_group_id.as_str(),
        )?)
        .await?;
    for transaction in &status.transactions {
        println!(
            "transaction {}: {} ({}), final: {}",
            transaction.transaction_id,
            transaction.status_title,
            transaction.status_code.as_i32(),
            transaction.status_code.is_final()
        );
    }

    Ok(())
}
