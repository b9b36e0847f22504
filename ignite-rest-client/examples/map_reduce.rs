//! Map/reduce, both server-side and orchestrated from the client.

use serde_json::json;

use ignite_rest_client::{ClientConfig, IgniteClient, ScriptJob};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;
    let compute = client.compute();

    // Server-side: both scripts run inside the cluster.
    let map = "function(nodes, arg) { \
               var words = arg.split(' '); \
               for (var i = 0; i < words.length; i++) { \
                 var f = function(word) { return word.length; }; \
                 emit(f, words[i], nodes[i % nodes.length]); \
               } }";
    let reduce = "function(results) { \
                  var sum = 0; \
                  for (var i = 0; i < results.length; i++) { sum += results[i]; } \
                  return sum; }";
    let total = compute
        .execute(map, reduce, &json!("Hello Ignite Enable World"))
        .await?;
    println!("server-side character count: {total}");

    // Client-side: the mapper and reducer are plain Rust.
    let total = compute
        .map_reduce(
            |_node, arg| {
                Some(ScriptJob::new("function(s) { return s.length; }").arg(arg.clone()))
            },
            |results| {
                results
                    .iter()
                    .filter_map(serde_json::Value::as_i64)
                    .sum::<i64>()
            },
            &json!("Hello"),
        )
        .await?;
    println!("client-side length sum: {total}");

    Ok(())
}
