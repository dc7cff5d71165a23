mod common;

use text2pay::{CountryCode, GetCarriers, GetCountryInfo, GetHelpLine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = common::client_from_env()?;
    let country = CountryCode::new(common::required_env("TEXT2PAY_COUNTRY")?)?;

    let info = client.execute(GetCountryInfo::new(country.clone())).await?;
    println!(
        "{} ({}), currency: {}, msisdn prefix: {}",
        info.country.title,
        info.country.code,
        info.currency.symbol,
        info.msisdn.international_prefix
    );
    println!("support: {} / {}", info.support_number, info.support_email);

    let carriers = client.execute(GetCarriers::new(country.clone())).await?;
    for carrier in &carriers.carriers {
        println!("carrier {}: {} (tier {})", carrier.code, carrier.title, carrier.tier);
    }

    let help = client.execute(GetHelpLine::new(country)).await?;
    println!("help line: {}", help.help_line);

    Ok(())
}
