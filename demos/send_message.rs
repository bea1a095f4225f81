use std::io;

use teleforte::TeleforteClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("TELEFORTE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELEFORTE_API_KEY environment variable is required",
        )
    })?;
    let recipients = std::env::var("TELEFORTE_RECIPIENTS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELEFORTE_RECIPIENTS environment variable is required (e.g. 491111,492222)",
        )
    })?;
    let sender = std::env::var("TELEFORTE_SENDER").unwrap_or_else(|_| "teleforte".to_owned());
    let message = std::env::var("TELEFORTE_MESSAGE")
        .unwrap_or_else(|_| "Hello from the teleforte demo.".to_owned());

    let mut client = TeleforteClient::with_sender(api_key, sender)?;
    for number in recipients.split(',').map(str::trim) {
        client.add_recipient(number)?;
    }

    let id = client.send_message(message).await?;
    println!("accepted, response id: {id}");

    Ok(())
}
