//! Minimal put/get round trip against a local node.
//!
//! Run with a node listening on the default REST port range:
//! `cargo run --example cache_put_get`

use ignite_rest_client::{ClientConfig, IgniteClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;
    println!("connected to {}", client.endpoint());

    let cache = client
        .get_or_create_cache::<String, String>("put-get-example")
        .await?;

    cache.put(&"key".to_string(), &"6".to_string()).await?;
    let value = cache.get(&"key".to_string()).await?;
    println!("got: {value:?}");

    client.destroy_cache("put-get-example").await?;
    Ok(())
}
