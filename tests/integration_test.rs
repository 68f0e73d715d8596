use ctor_provider::{args, signature, ConstructorProvider, InvokeError, ResolveError, TypeKey};
use ctor_recipe::catalog::model_provider;
use ctor_recipe::model::{Order, OrderId, OrderStatus, Point, Product, ProductId, User, UserId};
use ctor_recipe::records::{CellError, ColumnType, LoadError, RecordLoader};
use serde_json::json;
use std::sync::Arc;

/// Full pass over the catalog: load every model type from JSON rows.
#[test]
fn test_load_all_model_types() {
    let provider = model_provider();

    let users = RecordLoader::<User>::from_schema_json(&provider, r#"["user_id", "text", "text"]"#)
        .expect("Failed to resolve User loader")
        .load_json(r#"[[1, "Alice", "alice@example.com"], [2, "Bob", "bob@example.com"]]"#)
        .expect("Failed to load users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0], User::new(UserId(1), "Alice", "alice@example.com"));
    assert_eq!(users[1].name, "Bob");

    let products = RecordLoader::<Product>::new(
        &provider,
        vec![
            ColumnType::ProductId,
            ColumnType::Text,
            ColumnType::Float,
            ColumnType::Count,
        ],
    )
    .expect("Failed to resolve Product loader")
    .load_json(r#"[[1, "Super Widget", 25.5, 100]]"#)
    .expect("Failed to load products");
    assert_eq!(products[0].price, 25.5);
    assert!(products[0].in_stock());

    let orders = RecordLoader::<Order>::from_schema_json(
        &provider,
        r#"["order_id", "user_id", "product_id", "count", "float", "bool"]"#,
    )
    .expect("Failed to resolve Order loader")
    .load_json(r#"[[1, 1, 1, 5, 127.5, true], [2, 2, 1, 1, 25.5, false]]"#)
    .expect("Failed to load orders");
    assert_eq!(orders[0].status, OrderStatus::Paid);
    assert_eq!(orders[1].status, OrderStatus::Created);
    assert_eq!(orders[1].user_id, UserId(2));
}

#[test]
fn test_overload_chosen_by_schema() {
    let provider = model_provider();

    let guests = RecordLoader::<User>::from_schema_json(&provider, r#"["user_id"]"#)
        .unwrap()
        .load_json("[[7], [8]]")
        .unwrap();
    assert!(guests.iter().all(User::is_guest));
    assert_eq!(guests[1].name, "guest-8");

    let unlisted = RecordLoader::<Product>::from_schema_json(&provider, r#"["product_id", "text"]"#)
        .unwrap()
        .load_json(r#"[[3, "Prototype"]]"#)
        .unwrap();
    assert_eq!(unlisted[0], Product::unlisted(ProductId(3), "Prototype"));
    assert!(!unlisted[0].in_stock());
}

#[test]
fn test_unknown_schema_fails_before_loading() {
    let provider = model_provider();

    // Same column types as User::new, wrong order
    let err = RecordLoader::<User>::from_schema_json(&provider, r#"["text", "text", "user_id"]"#)
        .unwrap_err();
    match err {
        LoadError::Resolve(ResolveError::ConstructorNotFound { target, signature }) => {
            assert_eq!(target, TypeKey::of::<User>());
            assert_eq!(signature, signature![String, String, UserId]);
        }
        other => panic!("Expected ConstructorNotFound, got {other:?}"),
    }

    // Int is i64, Point::new takes f64
    let err = RecordLoader::<Point>::from_schema_json(&provider, r#"["int", "int"]"#).unwrap_err();
    assert!(matches!(err, LoadError::Resolve(_)));

    // Not a column type at all
    let err = RecordLoader::<Point>::from_schema_json(&provider, r#"["decimal"]"#).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_row_errors_carry_position() {
    let provider = model_provider();
    let loader = RecordLoader::<Point>::from_schema_json(&provider, r#"["float", "float"]"#).unwrap();

    // Short row: the invoker reports the arity
    let err = loader.load_row(0, &json!([3.0])).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invoke {
            row: 0,
            source: InvokeError::InvocationArityMismatch {
                expected: 2,
                actual: 1
            }
        }
    ));

    // Long row: same
    let err = loader.load_row(1, &json!([3.0, 4.0, 5.0])).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invoke {
            row: 1,
            source: InvokeError::InvocationArityMismatch {
                expected: 2,
                actual: 3
            }
        }
    ));

    // Wrong cell type in the middle of a batch
    let err = loader
        .load_json(r#"[[1, 2], [3, 4], ["a", 4]]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Cell {
            row: 2,
            column: 0,
            source: CellError::Mismatch { .. }
        }
    ));
    assert_eq!(
        err.to_string(),
        "Row 2, column 0: expected float, found string"
    );

    // Not an array
    let err = loader.load_row(4, &json!({"x": 1.0})).unwrap_err();
    assert!(matches!(err, LoadError::RowShape { row: 4, found: "object" }));
}

#[test]
fn test_point_scenario_through_catalog() {
    let provider = model_provider();
    let invoker = provider
        .get_invoker::<Point>(&signature![f64, f64])
        .expect("Point::new should resolve");

    let point = invoker.invoke(args![3.0, 4.0]).unwrap();
    assert_eq!(point, Point::new(3.0, 4.0));
    assert_eq!(point.distance_to(&Point::origin()), 5.0);

    assert!(matches!(
        invoker.invoke(args![3.0]),
        Err(InvokeError::InvocationArityMismatch { .. })
    ));
    assert!(matches!(
        invoker.invoke(args!["a", 4.0]),
        Err(InvokeError::ArgumentConversion { position: 0, .. })
    ));
}

#[test]
fn test_dynamic_target_from_catalog() {
    let provider = model_provider();

    // A caller that only knows the target at runtime
    let targets = [
        (TypeKey::of::<UserId>(), signature![u32]),
        (TypeKey::of::<OrderId>(), signature![u32]),
    ];
    for (target, signature) in targets {
        let err = provider.get_dynamic_invoker(target, &signature).unwrap_err();
        assert!(matches!(err, ResolveError::ConstructorNotFound { .. }));
    }

    let invoker = provider
        .get_dynamic_invoker(TypeKey::of::<User>(), &signature![UserId])
        .unwrap();
    let value = invoker.invoke(args![UserId(9)]).unwrap();
    assert_eq!(value.type_key(), TypeKey::of::<User>());
    assert!(value.downcast_ref::<User>().unwrap().is_guest());
}

#[tokio::test]
async fn test_loaders_shared_across_tasks() {
    let provider = Arc::new(model_provider());
    let loader = Arc::new(
        RecordLoader::<User>::from_schema_json(provider.as_ref(), r#"["user_id", "text", "text"]"#)
            .unwrap(),
    );

    let handles: Vec<_> = (0..8_u32)
        .map(|task| {
            let loader = loader.clone();
            tokio::spawn(async move {
                let rows: Vec<_> = (0..50_u32)
                    .map(|i| json!([task * 100 + i, format!("user-{task}-{i}"), "x@example.com"]))
                    .collect();
                loader.load_all(&rows)
            })
        })
        .collect();

    for (task, handle) in handles.into_iter().enumerate() {
        let users = handle.await.unwrap().unwrap();
        assert_eq!(users.len(), 50);
        assert_eq!(users[10].id, UserId(task as u32 * 100 + 10));
        assert_eq!(users[10].name, format!("user-{task}-10"));
    }
}
