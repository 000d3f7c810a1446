use std::pin::pin;

use futures::TryStreamExt;
use telnyx::domain::sim_cards::{ListSimCards, SimCardStatusValue};
use telnyx::{PageParams, TelnyxClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = TelnyxClient::from_env()?;
    let request = ListSimCards {
        page: PageParams::first(50)?,
        status: vec![SimCardStatusValue::Enabled, SimCardStatusValue::Standby],
        ..Default::default()
    };

    let mut sims = pin!(client.sim_cards().list_auto_paging(request));
    let mut count = 0usize;
    while let Some(sim) = sims.try_next().await? {
        count += 1;
        println!(
            "{} iccid={} status={:?} tags={:?}",
            sim.id,
            sim.iccid.as_deref().unwrap_or("-"),
            sim.status.value,
            sim.tags
        );
    }
    tracing::info!(count, "listed SIM cards");

    Ok(())
}
