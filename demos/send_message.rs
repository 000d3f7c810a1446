use std::io;

use telnyx::domain::messages::SendMessage;
use telnyx::{RawPhoneNumber, TelnyxClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let from = required_env("TELNYX_FROM")?;
    let to = required_env("TELNYX_TO")?;
    let text = std::env::var("TELNYX_TEXT")
        .unwrap_or_else(|_| "Hello from the telnyx demo.".to_owned());

    let client = TelnyxClient::from_env()?;
    let request = SendMessage::text(RawPhoneNumber::new(from)?, RawPhoneNumber::new(to)?, text)?;

    let message = client.messages().send(request).await?;
    for recipient in &message.to {
        println!(
            "message {} to {}: {:?}",
            message.id, recipient.phone_number, recipient.status
        );
    }
    if let Some(cost) = &message.cost {
        println!("cost: {} {}", cost.amount.as_str(), cost.currency);
    }

    Ok(())
}
