//! Cart operation scenarios against in-memory collaborators.

use std::sync::Arc;

use guava_cart::notify::messages;
use guava_cart::storage::{CART_KEY, MemoryStore, PersistentStore};
use guava_cart::store::CartStore;
use guava_core::{LineItem, ProductId};
use guava_integration_tests::{FakeInventory, RecordingNotifier, init_tracing, test_product};

struct Scenario {
    store: CartStore,
    inventory: Arc<FakeInventory>,
    storage: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
}

fn scenario() -> Scenario {
    init_tracing();

    let inventory = Arc::new(FakeInventory::new());
    let storage = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(inventory.clone(), storage.clone(), notifier.clone());

    Scenario {
        store,
        inventory,
        storage,
        notifier,
    }
}

fn persisted(storage: &MemoryStore) -> Option<Vec<LineItem>> {
    storage
        .get(CART_KEY)
        .expect("storage read failed")
        .map(|json| serde_json::from_str(&json).expect("persisted cart is not valid JSON"))
}

#[tokio::test]
async fn add_update_remove_full_flow() {
    let s = scenario();
    s.inventory.insert(test_product(42), 5);
    s.inventory.insert(test_product(7), 3);

    // Add two products, bump one
    s.store.add_product(ProductId::new(42)).await;
    s.store.add_product(ProductId::new(7)).await;
    s.store.update_product_amount(ProductId::new(42), 3).await;

    let cart = s.store.cart().await;
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0].id(), ProductId::new(42));
    assert_eq!(cart[0].amount, 3);
    assert_eq!(cart[1].amount, 1);
    assert_eq!(s.store.item_count().await, 4);

    // Every successful mutation keeps the snapshot in sync
    assert_eq!(persisted(&s.storage), Some(cart));

    // Remove one line; order of the rest is preserved
    s.store.remove_product(ProductId::new(42)).await;
    let cart = s.store.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id(), ProductId::new(7));
    assert_eq!(persisted(&s.storage), Some(cart));

    assert!(s.notifier.messages().is_empty());
}

#[tokio::test]
async fn stock_drift_blocks_later_update() {
    let s = scenario();
    s.inventory.insert(test_product(42), 5);

    s.store.add_product(ProductId::new(42)).await;

    // Stock drifts down after the add was validated; the cart is not
    // retroactively invalidated, but the next update re-validates
    s.inventory.set_stock(ProductId::new(42), 1);
    s.store.update_product_amount(ProductId::new(42), 2).await;

    assert_eq!(s.store.cart().await[0].amount, 1);
    assert_eq!(s.notifier.messages(), vec![messages::OUT_OF_STOCK]);
}

#[tokio::test]
async fn product_details_failure_aborts_add() {
    let s = scenario();
    s.inventory.insert(test_product(42), 5);
    s.inventory.insert(test_product(7), 5);
    s.store.add_product(ProductId::new(42)).await;
    let before = s.store.cart().await;
    let persisted_before = persisted(&s.storage);

    // Stock lookup succeeds but product details are gone; the whole add
    // aborts with no partial mutation
    s.inventory.remove_product_details(ProductId::new(7));
    s.store.add_product(ProductId::new(7)).await;

    assert_eq!(s.store.cart().await, before);
    assert_eq!(persisted(&s.storage), persisted_before);
    assert_eq!(s.notifier.messages(), vec![messages::ADD_FAILED]);
}

#[tokio::test]
async fn failed_operations_leave_no_trace() {
    let s = scenario();
    s.inventory.insert(test_product(42), 1);

    s.store.add_product(ProductId::new(42)).await;
    let before = s.store.cart().await;
    let persisted_before = persisted(&s.storage);

    // Stock ceiling, absent-item update, absent-item remove, unknown add
    s.store.add_product(ProductId::new(42)).await;
    s.store.update_product_amount(ProductId::new(9), 3).await;
    s.store.remove_product(ProductId::new(9)).await;
    s.store.add_product(ProductId::new(99)).await;

    assert_eq!(s.store.cart().await, before);
    assert_eq!(persisted(&s.storage), persisted_before);
    assert_eq!(
        s.notifier.messages(),
        vec![
            messages::OUT_OF_STOCK,
            messages::UPDATE_FAILED,
            messages::REMOVE_FAILED,
            messages::ADD_FAILED,
        ]
    );
}

#[tokio::test]
async fn zero_amount_update_never_reaches_inventory() {
    let s = scenario();
    s.inventory.insert(test_product(42), 5);
    s.store.add_product(ProductId::new(42)).await;
    let calls_before = s.inventory.stock_calls();

    s.store.update_product_amount(ProductId::new(42), 0).await;

    assert_eq!(s.inventory.stock_calls(), calls_before);
    assert_eq!(s.store.cart().await[0].amount, 1);
    assert!(s.notifier.messages().is_empty());
}

#[tokio::test]
async fn rapid_adds_all_land() {
    let s = scenario();
    s.inventory.insert(test_product(42), 10);

    let clones: Vec<CartStore> = (0..4).map(|_| s.store.clone()).collect();
    let handles: Vec<_> = clones
        .into_iter()
        .map(|store| tokio::spawn(async move { store.add_product(ProductId::new(42)).await }))
        .collect();
    for handle in handles {
        handle.await.expect("add task panicked");
    }

    // Four rapid clicks mean four units; no add reads a stale snapshot
    assert_eq!(s.store.cart().await[0].amount, 4);
}
