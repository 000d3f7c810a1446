use std::io::{self, BufRead, Write};

use telnyx::domain::verifications::{TriggerVerification, VerifyCode};
use telnyx::{PhoneNumber, RawPhoneNumber, ResourceId, TelnyxClient};

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

    let profile = ResourceId::new(required_env("TELNYX_VERIFY_PROFILE_ID")?)?;
    let phone: RawPhoneNumber = PhoneNumber::parse(None, required_env("TELNYX_TO")?)?.into();

    let client = TelnyxClient::from_env()?;
    let verifications = client.verifications();

    let pending = verifications
        .trigger_sms(TriggerVerification::new(phone.clone(), profile.clone()))
        .await?;
    println!("verification {} is {:?}", pending.id, pending.status);

    print!("code: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let result = verifications
        .verify_code(&phone, VerifyCode::new(code.trim(), profile)?)
        .await?;
    if result.is_accepted() {
        println!("{} verified", result.phone_number);
    } else {
        println!("code rejected");
    }

    Ok(())
}
