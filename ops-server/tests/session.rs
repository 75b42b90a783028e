mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use ops_server::Session;
use ops_server::session::{AdminSession, KitchenSession, WaiterSession};
use shared::models::{AttendanceStatus, InventoryItemUpdate, MenuItemUpdate, Role};
use shared::notification::NotificationSink;
use shared::order::{KitchenAction, OrderStatus};
use shared::stock::StockStatus;

use common::RecordingSink;

#[tokio::test]
async fn test_waiter_cart_and_submit() {
    let state = common::test_state().await;
    let pizza = state
        .gateway
        .menu_items
        .insert(common::menu_item("Margherita Pizza", "12.99", "Pizza", &["gluten", "dairy"]))
        .await
        .unwrap();
    let salad = state
        .gateway
        .menu_items
        .insert(common::menu_item("Caesar Salad", "8.99", "Salads", &["eggs"]))
        .await
        .unwrap();

    let sink = RecordingSink::new();
    let mut waiter = WaiterSession::start(&state, sink.clone()).await;
    assert_eq!(waiter.menu().len(), 2);
    assert_eq!(waiter.browse(Some("Pizza"), "").len(), 1);
    assert_eq!(waiter.browse(None, "caesar").len(), 1);
    assert_eq!(waiter.categories().len(), 2);

    assert_eq!(waiter.add_item(pizza.id), Some(1));
    assert_eq!(waiter.add_item(pizza.id), Some(2));
    assert_eq!(waiter.add_item(salad.id), Some(1));
    assert_eq!(waiter.draft().item_count(), 3);
    assert_eq!(waiter.draft().lines().len(), 2);
    assert_eq!(sink.last().unwrap().title, "Added to order");
    assert_eq!(
        waiter.allergen_warning().unwrap(),
        "This order contains: dairy, eggs, gluten"
    );
    assert_eq!(
        waiter.quote().unwrap().subtotal,
        "34.97".parse::<Decimal>().unwrap()
    );

    // missing table number: nothing written, cart kept
    assert!(waiter.submit(None, None, "").await.is_none());
    let failure = sink.last().unwrap();
    assert!(failure.is_destructive());
    assert_eq!(failure.title, "Error creating order");
    assert_eq!(waiter.draft().item_count(), 3);

    let order = waiter
        .submit(Some(7), Some("no onions".into()), "nuts, shellfish")
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.allergies, ["nuts", "shellfish"]);
    assert_eq!(order.special_instructions.as_deref(), Some("no onions"));
    assert!(waiter.draft().is_empty());
    let success = sink.last().unwrap();
    assert!(!success.is_destructive());
    assert_eq!(
        success.description,
        "Order for Table 7 has been sent to the kitchen"
    );

    // the live order list picks up the new order through the feed
    let orders = waiter.orders();
    assert!(common::eventually(move || async move { orders.len() == 1 }).await);

    waiter.end();
}

#[tokio::test]
async fn test_waiter_cannot_add_unavailable_item() {
    let state = common::test_state().await;
    let mut create = common::menu_item("Lobster", "40.00", "Mains", &["shellfish"]);
    create.available = false;
    let lobster = state.gateway.menu_items.insert(create).await.unwrap();

    let sink = RecordingSink::new();
    let mut waiter = WaiterSession::start(&state, sink.clone()).await;
    assert_eq!(waiter.add_item(lobster.id), None);
    assert!(sink.last().unwrap().is_destructive());
    assert!(waiter.draft().is_empty());

    assert_eq!(waiter.add_item(12345), None);
    assert!(!waiter.remove_item(lobster.id));
}

#[tokio::test]
async fn test_live_list_follows_menu_changes() {
    let state = common::test_state().await;
    let sink = RecordingSink::new();
    let waiter = WaiterSession::start(&state, sink.clone()).await;
    assert!(waiter.menu().is_empty());
    assert!(waiter.menu().is_live());

    let item = state
        .gateway
        .menu_items
        .insert(common::menu_item("Soup", "4.50", "Starters", &[]))
        .await
        .unwrap();
    let menu = waiter.menu();
    assert!(common::eventually(move || async move { menu.len() == 1 }).await);

    state
        .gateway
        .menu_items
        .update(
            item.id,
            MenuItemUpdate {
                name: Some("Tomato Soup".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let id = item.id;
    assert!(
        common::eventually(move || async move {
            menu.find(|m| m.id == id)
                .is_some_and(|m| m.name == "Tomato Soup")
        })
        .await
    );
    assert!(sink.all().iter().all(|n| !n.is_destructive()));
}

#[tokio::test]
async fn test_overlapping_refreshes_keep_latest_list() {
    let state = common::test_state().await;
    let sink = RecordingSink::new();
    let waiter = WaiterSession::start(&state, sink.clone()).await;
    let menu = waiter.menu();

    let inserts = async {
        for i in 0..10 {
            state
                .gateway
                .menu_items
                .insert(common::menu_item(&format!("Dish {i}"), "5.00", "Mains", &[]))
                .await
                .unwrap();
        }
    };
    let refreshes = futures::future::join_all((0..10).map(|_| menu.refresh()));
    tokio::join!(inserts, refreshes);
    menu.refresh().await;

    assert!(common::eventually(move || async move { menu.len() == 10 }).await);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(menu.len(), 10);
    assert_eq!(menu.snapshot().len(), 10);
    assert!(sink.all().iter().all(|n| !n.is_destructive()));
}

#[tokio::test]
async fn test_kitchen_queue_and_actions() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(
            Some(3),
            vec![common::line("Pasta", 1, "11.00")],
        ))
        .await
        .unwrap();
    state
        .gateway
        .inventory
        .insert(common::inventory("Basil", 0.5, 2.0))
        .await
        .unwrap();
    state
        .gateway
        .inventory
        .insert(common::inventory("Flour", 3.0, 4.0))
        .await
        .unwrap();
    state
        .gateway
        .inventory
        .insert(common::inventory("Salt", 9.0, 1.0))
        .await
        .unwrap();

    let sink = RecordingSink::new();
    let kitchen = KitchenSession::start(&state, sink.clone()).await;
    let queue = kitchen.queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].action, Some(KitchenAction::StartPreparing));

    let updated = kitchen
        .press(order.id, KitchenAction::StartPreparing)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Preparing);
    let toast = sink.last().unwrap();
    assert_eq!(toast.title, "Order Updated");
    assert_eq!(toast.description, "Order marked as preparing");

    let view = &kitchen;
    assert!(
        common::eventually(move || async move {
            view.queue()
                .first()
                .is_some_and(|t| t.action == Some(KitchenAction::MarkReady))
        })
        .await
    );

    // skipping a step is reported, not raised
    assert!(kitchen.press(order.id, KitchenAction::Complete).await.is_none());
    assert!(sink.last().unwrap().is_destructive());
    assert_eq!(sink.last().unwrap().title, "Error updating order");

    let alerts: Vec<(String, StockStatus)> = kitchen
        .inventory_alerts()
        .into_iter()
        .map(|i| (i.ingredient, i.status))
        .collect();
    assert_eq!(
        alerts,
        [
            ("Basil".to_string(), StockStatus::Critical),
            ("Flour".to_string(), StockStatus::Low),
        ]
    );
    assert_eq!(kitchen.stock_summary().good, 1);

    kitchen.end();
}

#[tokio::test]
async fn test_admin_crud_notifications() {
    let state = common::test_state().await;
    let sink = RecordingSink::new();
    let admin = AdminSession::start(&state, sink.clone()).await;

    let item = admin
        .add_inventory_item(common::inventory("Tomatoes", 25.0, 15.0))
        .await
        .unwrap();
    assert_eq!(sink.last().unwrap().description, "Inventory item added successfully");

    let updated = admin
        .update_inventory_item(
            item.id,
            InventoryItemUpdate {
                current_stock: Some(2.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, StockStatus::Critical);

    admin
        .add_staff(common::staff("Ana", AttendanceStatus::Present))
        .await
        .unwrap();
    admin
        .add_staff(common::staff("Marco", AttendanceStatus::Absent))
        .await
        .unwrap();
    admin
        .add_menu_item(common::menu_item("Soup", "4.50", "Starters", &[]))
        .await
        .unwrap();

    let view = &admin;
    assert!(
        common::eventually(move || async move {
            let overview = view.overview();
            overview.attendance.total == 2
                && overview.stock.critical == 1
                && overview.menu_items == 1
        })
        .await
    );
    let overview = admin.overview();
    assert_eq!(overview.attendance.absent, 1);
    assert_eq!(overview.available_menu_items, 1);

    sink.clear();
    assert!(!admin.delete_staff(987654).await);
    let failure = sink.last().unwrap();
    assert!(failure.is_destructive());
    assert_eq!(failure.title, "Error deleting staff member");

    assert!(admin.delete_inventory_item(item.id).await);
    assert_eq!(sink.last().unwrap().title, "Success");

    admin.end();
}

#[tokio::test]
async fn test_fetch_failure_is_reported() {
    let state = common::test_state().await;
    let sink = RecordingSink::new();
    let admin = AdminSession::start(&state, sink.clone()).await;
    sink.clear();

    state.db.pool.close().await;
    admin.staff().refresh().await;

    let failure = sink.last().unwrap();
    assert!(failure.is_destructive());
    assert_eq!(failure.title, "Error fetching staff");
}

#[tokio::test]
async fn test_session_start_by_role() {
    let state = common::test_state().await;
    let sink: Arc<dyn NotificationSink> = RecordingSink::new();
    for role in Role::ALL {
        let session = Session::start(role, &state, sink.clone()).await;
        assert_eq!(session.role(), role);
        assert_eq!(session.screens().home, role.home().path());
        session.end();
    }
}
