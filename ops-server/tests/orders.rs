mod common;

use rust_decimal::Decimal;
use shared::ErrorCode;
use shared::message::ChangeAction;
use shared::models::OrderUpdate;
use shared::order::{KitchenAction, OrderStatus, TaxRate, TransitionPolicy};
use shared::types::ListQuery;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn pizza_and_salad() -> Vec<shared::models::OrderLine> {
    vec![
        common::line("Margherita Pizza", 2, "12.99"),
        common::line("Caesar Salad", 1, "8.99"),
    ]
}

#[tokio::test]
async fn test_submit_prices_with_default_rate() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(Some(5), pizza_and_salad()))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.table_number, 5);
    assert_eq!(order.subtotal, dec("34.97"));
    assert_eq!(order.tax, dec("3.50"));
    assert_eq!(order.total, dec("38.47"));
    assert_eq!(order.items, pizza_and_salad());
}

#[tokio::test]
async fn test_submit_prices_with_configured_rate() {
    let state = common::state_with(|c| c.tax_rate = TaxRate::new(dec("0.13")).unwrap()).await;
    let order = state
        .orders
        .submit(common::submission(Some(2), pizza_and_salad()))
        .await
        .unwrap();

    assert_eq!(order.subtotal, dec("34.97"));
    assert_eq!(order.tax, dec("4.55"));
    assert_eq!(order.total, dec("39.52"));
}

#[tokio::test]
async fn test_submit_normalizes_notes_and_allergies() {
    let state = common::test_state().await;
    let mut submission = common::submission(Some(1), pizza_and_salad());
    submission.special_instructions = Some("   ".into());
    submission.allergies = vec!["nuts".into(), " dairy".into(), "nuts".into()];

    let order = state.orders.submit(submission).await.unwrap();
    assert!(order.special_instructions.is_none());
    assert_eq!(order.allergies, ["dairy", "nuts"]);
}

#[tokio::test]
async fn test_invalid_submissions_create_nothing() {
    let state = common::test_state().await;

    let err = state
        .orders
        .submit(common::submission(None, pizza_and_salad()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableNumberRequired);

    let err = state
        .orders
        .submit(common::submission(Some(0), pizza_and_salad()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableNumberRequired);

    let err = state
        .orders
        .submit(common::submission(Some(3), vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderEmpty);

    let orders = state.gateway.orders.list(&ListQuery::new()).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_out_of_range_lines_create_nothing() {
    let state = common::test_state().await;

    let err = state
        .orders
        .submit(common::submission(
            Some(4),
            vec![common::line("Refund", 3, "-10.00")],
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuItemInvalidPrice);

    let mut huge = common::line("Caviar", 2, "1");
    huge.price = Decimal::MAX;
    let err = state
        .orders
        .submit(common::submission(Some(4), vec![huge.clone()]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuItemInvalidPrice);
    assert!(state.orders.quote(&[huge]).is_err());

    let err = state
        .orders
        .submit(common::submission(
            Some(4),
            vec![common::line("Water", 10_000, "1.00")],
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let orders = state.gateway.orders.list(&ListQuery::new()).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_stale_status_write_cannot_move_order_backwards() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(Some(6), pizza_and_salad()))
        .await
        .unwrap();

    // another session moved the order on after this one read `pending`
    state
        .orders
        .advance(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    state
        .orders
        .advance(order.id, OrderStatus::Ready)
        .await
        .unwrap();

    let mut rx = state.gateway.orders.receiver();
    let err = state
        .gateway
        .orders
        .update(
            order.id,
            OrderUpdate {
                status: Some(OrderStatus::Preparing),
                expected_status: Some(OrderStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    assert_eq!(err.details.unwrap()["expected"], "pending");

    let current = state.gateway.orders.get(order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Ready);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_concurrent_advances_apply_once() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(Some(7), pizza_and_salad()))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        state.orders.advance(order.id, OrderStatus::Preparing),
        state.orders.advance(order.id, OrderStatus::Preparing),
    );
    let succeeded = [a.is_ok(), b.is_ok()].into_iter().filter(|ok| *ok).count();
    assert_eq!(succeeded, 1);
    for err in [a, b].into_iter().filter_map(Result::err) {
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }

    let current = state.gateway.orders.get(order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn test_lifecycle_moves_one_step_at_a_time() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(Some(4), pizza_and_salad()))
        .await
        .unwrap();

    let err = state
        .orders
        .advance(order.id, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    let preparing = state
        .orders
        .advance(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(preparing.status, OrderStatus::Preparing);

    let err = state
        .orders
        .advance(order.id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    let ready = state
        .orders
        .apply_action(order.id, KitchenAction::MarkReady)
        .await
        .unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);

    // completion is not exposed by default: the order stays ready
    let err = state
        .orders
        .advance(order.id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CompletionNotExposed);
    let stored = state.gateway.orders.get(order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Ready);
}

#[tokio::test]
async fn test_completion_when_enabled() {
    let state =
        common::state_with(|c| c.transition_policy = TransitionPolicy::WITH_COMPLETION).await;
    let order = state
        .orders
        .submit(common::submission(Some(4), pizza_and_salad()))
        .await
        .unwrap();
    for target in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        state.orders.advance(order.id, target).await.unwrap();
    }

    let err = state
        .orders
        .advance(order.id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderAlreadyCompleted);
}

#[tokio::test]
async fn test_advance_unknown_order() {
    let state = common::test_state().await;
    let err = state
        .orders
        .advance(99, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn test_submit_and_advance_publish_events() {
    let state = common::test_state().await;
    let mut rx = state.gateway.orders.receiver();

    let order = state
        .orders
        .submit(common::submission(Some(8), pizza_and_salad()))
        .await
        .unwrap();
    state
        .orders
        .advance(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    // rejected transition: no event
    let _ = state.orders.advance(order.id, OrderStatus::Completed).await;

    let created = rx.recv().await.unwrap();
    assert_eq!(created.action, ChangeAction::Created);
    assert_eq!(created.data.unwrap()["status"], "pending");

    let updated = rx.recv().await.unwrap();
    assert_eq!(updated.action, ChangeAction::Updated);
    assert_eq!(updated.data.unwrap()["status"], "preparing");

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_kitchen_queue_hides_completed_orders() {
    let state =
        common::state_with(|c| c.transition_policy = TransitionPolicy::WITH_COMPLETION).await;
    let mut ids = Vec::new();
    for table in 1..=3 {
        let order = state
            .orders
            .submit(common::submission(Some(table), pizza_and_salad()))
            .await
            .unwrap();
        ids.push(order.id);
        tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    }
    // table 1 → completed, table 2 → preparing
    for target in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        state.orders.advance(ids[0], target).await.unwrap();
    }
    state
        .orders
        .advance(ids[1], OrderStatus::Preparing)
        .await
        .unwrap();

    let queue = state.orders.kitchen_queue().await.unwrap();
    let tables: Vec<i32> = queue.iter().map(|t| t.order.table_number).collect();
    assert_eq!(tables, [3, 2]);
    assert_eq!(queue[0].action, Some(KitchenAction::StartPreparing));
    assert_eq!(queue[0].action_label, Some("Start Preparing"));
    assert_eq!(queue[1].action, Some(KitchenAction::MarkReady));
}

#[tokio::test]
async fn test_ready_has_no_kitchen_action_by_default() {
    let state = common::test_state().await;
    let order = state
        .orders
        .submit(common::submission(Some(6), pizza_and_salad()))
        .await
        .unwrap();
    state
        .orders
        .advance(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    state
        .orders
        .advance(order.id, OrderStatus::Ready)
        .await
        .unwrap();

    let queue = state.orders.kitchen_queue().await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].order.status, OrderStatus::Ready);
    assert!(queue[0].action.is_none());
}

#[test]
fn test_quote_matches_submit_pricing() {
    let lines = pizza_and_salad();
    let breakdown = shared::order::price_lines(&lines, TaxRate::DEFAULT).unwrap();
    assert_eq!(breakdown.total, dec("38.47"));
}
