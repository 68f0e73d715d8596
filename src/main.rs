//! Demo: load users, products and orders from JSON rows, then build points from
//! several tasks sharing one invoker.

use ctor_provider::{args, signature, ConstructorProvider};
use ctor_recipe::catalog::model_provider;
use ctor_recipe::model::{Order, Point, Product, User};
use ctor_recipe::records::RecordLoader;
use ctor_recipe::runtime::setup_tracing;
use std::sync::Arc;
use tracing::{error, info, Instrument};

const USERS: &str = r#"[
    [1, "Alice", "alice@example.com"],
    [2, "Bob", "bob@example.com"]
]"#;

const PRODUCTS: &str = r#"[
    [1, "Super Widget", 25.5, 100],
    [2, "Gadget", 9.99, 0]
]"#;

const ORDERS: &str = r#"[
    [1, 1, 1, 5, 127.5],
    [2, 2, 1, 1, "free"]
]"#;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting constructor provider demo");

    let provider = Arc::new(model_provider());

    let span = tracing::info_span!("load_records");
    async {
        let users = RecordLoader::<User>::from_schema_json(
            provider.as_ref(),
            r#"["user_id", "text", "text"]"#,
        )?
        .load_json(USERS)?;
        info!(count = users.len(), "Users loaded");

        let products = RecordLoader::<Product>::from_schema_json(
            provider.as_ref(),
            r#"["product_id", "text", "float", "count"]"#,
        )?
        .load_json(PRODUCTS)?;
        let in_stock = products.iter().filter(|p| p.in_stock()).count();
        info!(count = products.len(), in_stock, "Products loaded");

        // The second row has a text total; the whole batch is rejected.
        let orders = RecordLoader::<Order>::from_schema_json(
            provider.as_ref(),
            r#"["order_id", "user_id", "product_id", "count", "float"]"#,
        )?;
        match orders.load_json(ORDERS) {
            Ok(orders) => info!(count = orders.len(), "Orders loaded"),
            Err(e) => error!(error = %e, "Orders rejected"),
        }

        Ok::<_, ctor_recipe::records::LoadError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let new_point = provider
        .get_invoker::<Point>(&signature![f64, f64])
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("concurrent_points");
    let tasks: Vec<_> = (0..4_i32)
        .map(|task| {
            let new_point = new_point.clone();
            tokio::spawn(
                async move {
                    (0..1000_i32)
                        .map(|i| new_point.invoke(args![f64::from(task), f64::from(i)]))
                        .collect::<Result<Vec<Point>, _>>()
                }
                .instrument(span.clone()),
            )
        })
        .collect();

    let mut total = 0;
    for task in tasks {
        let points = task
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())?;
        total += points.len();
    }
    info!(total, "Points constructed");

    info!("Demo completed successfully");
    Ok(())
}
