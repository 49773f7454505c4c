use inventory_api::clients::ProductClient;
use inventory_api::config::AppConfig;
use inventory_api::lifecycle::InventorySystem;
use inventory_api::model::{ProductCreate, ProductId, ProductUpdate};
use inventory_api::product_actor::{ErrorKind, ProductError, Quantity};

async fn seeded(stock: u32) -> (InventorySystem, ProductId) {
    let system = InventorySystem::new(&AppConfig::default());
    let id = system
        .product_client
        .create_product(ProductCreate::new("Widget", "A widget").with_stock(stock))
        .await
        .expect("Failed to create product");
    (system, id)
}

async fn stock_of(client: &ProductClient, id: ProductId) -> u32 {
    client.check_stock(id).await.expect("Failed to check stock")
}

#[tokio::test]
async fn test_increase_adds_quantity() {
    let (system, id) = seeded(10).await;

    let product = system
        .product_client
        .increase_stock(id, Some(Quantity::new(5)))
        .await
        .unwrap();
    assert_eq!(product.stock_quantity, 15);
    assert_eq!(product.id, id);
    assert_eq!(product.name, "Widget");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_decrease_subtracts_quantity() {
    let (system, id) = seeded(10).await;

    let product = system
        .product_client
        .decrease_stock(id, Some(Quantity::new(3)))
        .await
        .unwrap();
    assert_eq!(product.stock_quantity, 7);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_decrease_beyond_stock_is_rejected_and_leaves_stock() {
    let (system, id) = seeded(10).await;

    let err = system
        .product_client
        .decrease_stock(id, Some(Quantity::new(15)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProductError::InsufficientStock {
            requested: 15,
            available: 10
        }
    );
    assert_eq!(stock_of(&system.product_client, id).await, 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_adjusting_missing_product_is_not_found() {
    let (system, id) = seeded(10).await;
    let missing = ProductId(id.0 + 100);

    let err = system
        .product_client
        .increase_stock(missing, Some(Quantity::new(5)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = system
        .product_client
        .decrease_stock(missing, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Nothing was created by the failed adjustments.
    assert_eq!(system.product_client.list_products().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_omitted_quantity_means_one() {
    let (system, id) = seeded(10).await;
    let client = &system.product_client;

    assert_eq!(client.decrease_stock(id, None).await.unwrap().stock_quantity, 9);
    assert_eq!(
        client
            .decrease_stock(id, Some(Quantity::new(1)))
            .await
            .unwrap()
            .stock_quantity,
        8
    );
    assert_eq!(client.increase_stock(id, None).await.unwrap().stock_quantity, 9);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_decreases_never_oversell() {
    let (system, id) = seeded(10).await;
    let a = system.product_client.clone();
    let b = system.product_client.clone();

    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.decrease_stock(id, Some(Quantity::new(6))).await }),
        tokio::spawn(async move { b.decrease_stock(id, Some(Quantity::new(6))).await }),
    );
    let results = [first.unwrap(), second.unwrap()];

    let successes: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(successes.len(), 1, "exactly one decrease may succeed");
    assert_eq!(successes[0].stock_quantity, 4);

    let failure = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one decrease must fail");
    assert_eq!(failure.kind(), ErrorKind::InsufficientStock);

    assert_eq!(stock_of(&system.product_client, id).await, 4);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_many_concurrent_decreases_stop_at_zero() {
    let (system, id) = seeded(25).await;

    let tasks: Vec<_> = (0..40)
        .map(|_| {
            let client = system.product_client.clone();
            tokio::spawn(async move { client.decrease_stock(id, None).await })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InsufficientStock),
        }
    }

    assert_eq!(succeeded, 25);
    assert_eq!(stock_of(&system.product_client, id).await, 0);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_increase_then_decrease_round_trips() {
    let (system, id) = seeded(7).await;
    let client = &system.product_client;

    client.increase_stock(id, Some(Quantity::new(12))).await.unwrap();
    let product = client
        .decrease_stock(id, Some(Quantity::new(12)))
        .await
        .unwrap();
    assert_eq!(product.stock_quantity, 7);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_product_crud_lifecycle() {
    let system = InventorySystem::new(&AppConfig::default());
    let client = &system.product_client;

    let ids = client
        .create_products(vec![
            ProductCreate::new("Bolt", "M6 bolt").with_stock(100).with_threshold(20),
            ProductCreate::new("Nut", "M6 nut").with_stock(3).with_threshold(5),
        ])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);

    let all = client.list_products().await.unwrap();
    assert_eq!(
        all.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Bolt", "Nut"]
    );

    let low = client.list_low_stock().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Nut");

    let renamed = client
        .update_product(
            ids[0],
            ProductUpdate {
                name: Some("Hex bolt".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Hex bolt");
    assert_eq!(renamed.stock_quantity, 100);

    client.delete_product(ids[1]).await.unwrap();
    assert_eq!(
        client.get_product(ids[1]).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        client.delete_product(ids[1]).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_names_are_conflicts() {
    let (system, id) = seeded(1).await;
    let client = &system.product_client;

    let err = client
        .create_product(ProductCreate::new("Widget", "Another widget"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // A batch containing one clashing name stores nothing.
    let err = client
        .create_products(vec![
            ProductCreate::new("Gadget", "New"),
            ProductCreate::new("Widget", "Clash"),
        ])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(client.list_products().await.unwrap().len(), 1);

    let other = client
        .create_product(ProductCreate::new("Gadget", "New"))
        .await
        .unwrap();
    let err = client
        .update_product(
            other,
            ProductUpdate {
                name: Some("Widget".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(client.get_product(id).await.unwrap().name, "Widget");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_of_missing_product_is_not_found() {
    let system = InventorySystem::new(&AppConfig::default());
    let err = system
        .product_client
        .update_product(
            ProductId(9),
            ProductUpdate {
                low_stock_threshold: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_waits_for_actor() {
    let (system, _) = seeded(1).await;
    let clone = system.product_client.clone();
    drop(clone);
    system
        .shutdown()
        .await
        .expect("shutdown should complete cleanly");
}
