//! Script execution on the connected node.

use serde_json::json;

use ignite_rest_client::{ClientConfig, IgniteClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;

    let compute = client.compute();
    let result = compute
        .run(
            "function(a, b) { return a + b; }",
            &[json!(40), json!(2)],
        )
        .await?;
    println!("script result: {result}");

    Ok(())
}
