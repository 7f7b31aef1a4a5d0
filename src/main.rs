use std::io;

use newsletter_relay::configuration::Settings;
use newsletter_relay::startup::Application;
use newsletter_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("newsletter-relay".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config().expect("Failed to load configuration");

    // Run the application until it is stopped
    Application::build(config)?.run_until_stopped().await?;

    Ok(())
}
