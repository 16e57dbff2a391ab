use copyleaks_client::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    setup_logger();

    // Credentials come from COPYLEAKS_EMAIL / COPYLEAKS_API_KEY (or .env)
    let config = Config::new().with_sandbox(true);
    let client = Client::new(config)?;

    info!("Logging in...");
    client.login_with_config().await?;
    info!("✓ Logged in");

    let credits = client.count_credits().await?;
    info!("Credits: {}", credits);

    let options = CallbackOptions::new()
        .with_http_callback("https://example.com/copyleaks/{PID}/completed")
        .with_allow_partial_scan(true);
    let process = client
        .create_by_text("The quick brown fox jumps over the lazy dog.", &options)
        .await?;
    info!("Scan created: {}", process);

    let Some(process_id) = process.get("ProcessId").and_then(Value::as_str) else {
        warn!("No process id in response");
        return Ok(());
    };

    for _ in 0..10 {
        let status = client.status(process_id).await?;
        info!("Status: {}", status);
        if status.get("Status").and_then(Value::as_str) == Some("Finished") {
            let result = client.result(process_id).await?;
            info!("Result: {:#}", result);
            break;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    Ok(())
}
