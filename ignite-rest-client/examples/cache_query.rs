//! Paged SQL query over typed entries.

use serde::{Deserialize, Serialize};
use serde_json::json;

use ignite_rest_client::{ClientConfig, IgniteClient, Query};

#[derive(Debug, Serialize, Deserialize)]
struct Person {
    name: String,
    salary: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;

    let cache = client
        .get_or_create_cache::<i64, Person>("query-example")
        .await?;
    for (id, name, salary) in [(1, "Ann", 1000), (2, "Bob", 2000), (3, "Cat", 3000)] {
        cache
            .put(
                &id,
                &Person {
                    name: name.to_string(),
                    salary,
                },
            )
            .await?;
    }

    let query = Query::sql("salary > ?", "Person")
        .with_page_size(2)
        .arg(json!(1500));
    let mut cursor = cache.query(query);

    while !cursor.is_finished() {
        for item in cursor.next_page().await? {
            println!("row: {item}");
        }
    }

    client.destroy_cache("query-example").await?;
    Ok(())
}
