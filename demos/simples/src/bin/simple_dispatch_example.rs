use copyleaks_client::prelude::*;
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let client = Client::new(Config::new())?;

    // Metadata endpoints need no login
    let (tx, rx) = oneshot::channel();
    let handle = client.dispatch(
        RequestSpec::get("miscellaneous/supported-file-types").with_headers(default_headers()),
        move |result| {
            let _ = tx.send(result);
        },
    );
    handle.join().await;

    match rx.await? {
        Ok(types) => info!("Supported file types: {:#}", types),
        Err(e) => error!("Request failed: {}", e),
    }

    Ok(())
}
