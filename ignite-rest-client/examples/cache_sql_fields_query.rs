//! SQL fields query: DDL, parametrized inserts, and a projection with
//! fields metadata.

use ignite_rest_client::{ClientConfig, IgniteClient, Query};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .address("127.0.0.1:8000..9000")
        .build()?;
    let client = IgniteClient::connect(config).await?;

    let cache = client
        .get_or_create_cache::<i64, serde_json::Value>("fields-example")
        .await?;

    cache
        .query(Query::sql_fields(
            "CREATE TABLE IF NOT EXISTS Person (id INT PRIMARY KEY, name VARCHAR, city VARCHAR)",
        ))
        .get_all()
        .await?;

    for (id, name, city) in [(1, "Ann", "Oslo"), (2, "Bob", "Lima"), (3, "Cat", "Oslo")] {
        cache
            .query(
                Query::sql_fields("INSERT INTO Person (id, name, city) VALUES (?, ?, ?)")
                    .arg(id)
                    .arg(name)
                    .arg(city),
            )
            .get_all()
            .await?;
    }

    let mut cursor = cache.query(
        Query::sql_fields("SELECT name, city FROM Person WHERE city = ?")
            .with_page_size(2)
            .arg("Oslo"),
    );
    let rows = cursor.get_all().await?;
    for field in cursor.fields_metadata() {
        println!(
            "field: {} ({})",
            field.field_name.as_deref().unwrap_or("?"),
            field.field_type_name.as_deref().unwrap_or("?")
        );
    }
    for row in rows {
        println!("row: {row}");
    }

    cache
        .query(Query::sql_fields("DROP TABLE IF EXISTS Person"))
        .get_all()
        .await?;
    client.destroy_cache("fields-example").await?;
    Ok(())
}
