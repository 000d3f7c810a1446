use std::io;
use std::time::Duration;

use telnyx::domain::calls::{DialCall, HangupCall, SpeakText};
use telnyx::{RawPhoneNumber, ResourceId, TelnyxClient};

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

    let connection_id = ResourceId::new(required_env("TELNYX_CONNECTION_ID")?)?;
    let from = RawPhoneNumber::new(required_env("TELNYX_FROM")?)?;
    let to = RawPhoneNumber::new(required_env("TELNYX_TO")?)?;

    let client = TelnyxClient::from_env()?;
    let calls = client.calls();

    let call = calls
        .dial(DialCall::new(connection_id, to, from).with_timeout_secs(30)?)
        .await?;
    let id = telnyx::CallControlId::new(call.call_control_id)?;
    println!("dialing, call_control_id={}", id.as_str());

    // Answer is reported by webhook; poll until the leg is up.
    for _ in 0..30 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let status = calls.retrieve_status(&id).await?;
        if status.is_alive && status.call_duration.unwrap_or(0) > 0 {
            break;
        }
    }

    let spoken = calls
        .speak(&id, SpeakText::new("Hello from the Telnyx demo.", "female")?)
        .await?;
    println!("speak: {}", spoken.result);

    tokio::time::sleep(Duration::from_secs(5)).await;
    calls.hangup(&id, HangupCall::default()).await?;
    println!("hung up");

    Ok(())
}
