//! Tour of the cache verbs: conditional puts, batches, replace and size.

use ignite_rest_client::{CacheEntry, ClientConfig, IgniteClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;

    let cache = client
        .get_or_create_cache::<String, String>("api-example")
        .await?;

    let key = "k1".to_string();
    println!(
        "put_if_absent (fresh): {}",
        cache.put_if_absent(&key, &"v1".to_string()).await?
    );
    println!(
        "put_if_absent (again): {}",
        cache.put_if_absent(&key, &"v2".to_string()).await?
    );
    println!(
        "get_and_put prior: {:?}",
        cache.get_and_put(&key, &"v3".to_string()).await?
    );
    println!(
        "replace_value (wrong expected): {}",
        cache
            .replace_value(&key, &"v4".to_string(), &"nope".to_string())
            .await?
    );

    cache
        .put_all(&[
            CacheEntry::new("k2".to_string(), "v2".to_string()),
            CacheEntry::new("k3".to_string(), "v3".to_string()),
        ])
        .await?;
    let entries = cache
        .get_all(&["k1".to_string(), "k2".to_string(), "k3".to_string()])
        .await?;
    println!("get_all returned {} entries", entries.len());
    println!("size: {}", cache.size().await?);

    cache.remove_all(&["k1".to_string(), "k2".to_string()]).await?;
    println!("contains k1 after remove_all: {}", cache.contains_key(&"k1".to_string()).await?);

    client.destroy_cache("api-example").await?;
    Ok(())
}
