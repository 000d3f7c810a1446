use telnyx::TelnyxClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = TelnyxClient::from_env()?;
    let balance = client.balance().retrieve().await?;

    println!("balance: {} {}", balance.balance.as_str(), balance.currency);
    if let Some(available) = &balance.available_credit {
        println!("available credit: {}", available.as_str());
    }
    if let Some(pending) = &balance.pending {
        println!("pending: {}", pending.as_str());
    }

    Ok(())
}
