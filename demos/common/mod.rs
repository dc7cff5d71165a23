use std::io;

use text2pay::{Connection, Text2PayClient};

pub fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Client configured from `TEXT2PAY_*` environment variables.
pub fn client_from_env() -> Result<Text2PayClient, Box<dyn std::error::Error>> {
    let mut connection = Connection::new(
        required_env("TEXT2PAY_API_KEY")?,
        required_env("TEXT2PAY_PUB_ID")?,
        required_env("TEXT2PAY_USERNAME")?,
        required_env("TEXT2PAY_PASSWORD")?,
    )?;
    if let Ok(source) = std::env::var("TEXT2PAY_SOURCE") {
        connection = connection.with_source(source)?;
    }

    let mut builder = Text2PayClient::builder(connection).user_agent("text2pay-demos");
    if let Ok(endpoint) = std::env::var("TEXT2PAY_ENDPOINT") {
        builder = builder.endpoint(endpoint);
    }
    Ok(builder.build()?)
}
