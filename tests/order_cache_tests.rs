//--------------------------------------------------------------------------------------------------
// TEST MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Integration tests for the order cache, driven only through the public API.
//
// | Name                                        | Description                                   |
// |---------------------------------------------|-----------------------------------------------|
// | test_matching_reference_scenario            | Same-company skip and in-place decrements     |
// | test_matching_is_destructive                | Second call never exceeds the first           |
// | test_duplicate_add_leaves_state_unchanged   | Idempotent rejection                          |
// | test_invalid_orders_leave_state_unchanged   | Validation of every field                     |
// | test_swap_removal                           | Non-last then originally-last cancellation    |
// | test_minimum_qty_cancellation               | Inclusive threshold, empty entry removed      |
// | test_cancel_for_user_across_securities      | Bulk removal while the store shrinks          |
// | test_snapshot_is_a_copy                     | Callers cannot reach internal state           |
// | test_service_trait_object                   | Cache usable behind the service trait         |
//--------------------------------------------------------------------------------------------------

use order_cache::{Order, OrderCache, OrderCacheService, OrderMessage, Side};

fn create_test_order(id: &str, security: &str, side: Side, qty: u32, user: &str, company: &str) -> Order {
    Order::new(id, security, side, qty, user, company)
}

fn qty_of(cache: &OrderCache, order_id: &str) -> Option<u32> {
    cache
        .get_all_orders()
        .into_iter()
        .find(|o| o.order_id() == order_id)
        .map(|o| o.qty())
}

fn sorted_ids(cache: &OrderCache) -> Vec<String> {
    let mut ids: Vec<String> = cache
        .get_all_orders()
        .into_iter()
        .map(|o| o.order_id().to_owned())
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_matching_reference_scenario() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("BuyA", "S1", Side::Buy, 100, "U1", "A"));
    cache.add_order(create_test_order("BuyB", "S1", Side::Buy, 50, "U2", "B"));
    cache.add_order(create_test_order("SellC", "S1", Side::Sell, 80, "U3", "C"));
    cache.add_order(create_test_order("SellA", "S1", Side::Sell, 70, "U4", "A"));

    assert_eq!(cache.get_matching_size_for_security("S1"), 130);
    assert_eq!(qty_of(&cache, "BuyA"), Some(20));
    assert_eq!(qty_of(&cache, "BuyB"), Some(0));
    assert_eq!(qty_of(&cache, "SellC"), Some(0));
    assert_eq!(qty_of(&cache, "SellA"), Some(20));

    // Exhausted orders remain until cancelled
    assert_eq!(cache.len(), 4);
    cache.check_consistency().unwrap();
}

#[test]
fn test_matching_unknown_security() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    assert_eq!(cache.get_matching_size_for_security("S2"), 0);
}

#[test]
fn test_matching_is_destructive() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 500, "U1", "A"));
    cache.add_order(create_test_order("OrdId2", "S1", Side::Sell, 200, "U2", "B"));
    cache.add_order(create_test_order("OrdId3", "S1", Side::Sell, 100, "U3", "C"));

    let first = cache.get_matching_size_for_security("S1");
    let second = cache.get_matching_size_for_security("S1");
    assert_eq!(first, 300);
    assert!(second < first);
    assert_eq!(second, 0);

    // New liquidity matches against what is left
    cache.add_order(create_test_order("OrdId4", "S1", Side::Sell, 250, "U4", "D"));
    assert_eq!(cache.get_matching_size_for_security("S1"), 200);
}

#[test]
fn test_duplicate_add_leaves_state_unchanged() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    let before = cache.get_all_orders();

    cache.add_order(create_test_order("OrdId1", "S2", Side::Sell, 999, "U9", "Z"));

    assert_eq!(cache.get_all_orders(), before);
    assert_eq!(cache.security_count(), 1);
    assert_eq!(cache.get_matching_size_for_security("S2"), 0);
}

#[test]
fn test_invalid_orders_leave_state_unchanged() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    let before = cache.get_all_orders();

    cache.add_order(create_test_order("OrdId2", "S1", Side::Sell, 0, "U1", "B"));
    cache.add_order(create_test_order("", "S1", Side::Sell, 10, "U1", "B"));
    cache.add_order(create_test_order("OrdId3", "", Side::Sell, 10, "U1", "B"));
    cache.add_order(create_test_order("OrdId4", "S1", Side::Sell, 10, "", "B"));
    cache.add_order(create_test_order("OrdId5", "S1", Side::Sell, 10, "U1", ""));

    let bad_side = OrderMessage {
        order_id: "OrdId6".to_string(),
        security_id: "S1".to_string(),
        side: "Hold".to_string(),
        qty: 10,
        user: "U1".to_string(),
        company: "B".to_string(),
    };
    order_cache::inbounds::handlers::place_handler::place_order_message(&mut cache, bad_side);

    assert_eq!(cache.get_all_orders(), before);
    assert_eq!(cache.security_count(), 1);
    cache.check_consistency().unwrap();
}

#[test]
fn test_swap_removal() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    cache.add_order(create_test_order("OrdId2", "S2", Side::Sell, 200, "U2", "B"));
    cache.add_order(create_test_order("OrdId3", "S1", Side::Sell, 300, "U3", "C"));
    cache.add_order(create_test_order("OrdId4", "S2", Side::Buy, 400, "U4", "D"));

    cache.cancel_order("OrdId2");
    cache.check_consistency().unwrap();
    cache.cancel_order("OrdId4");
    cache.check_consistency().unwrap();

    assert_eq!(sorted_ids(&cache), vec!["OrdId1", "OrdId3"]);
    assert_eq!(cache.security_count(), 1);
    assert!(cache.orders_for_security("S2").is_empty());

    let s1: Vec<String> = cache
        .orders_for_security("S1")
        .into_iter()
        .map(|o| o.order_id().to_owned())
        .collect();
    assert_eq!(s1, vec!["OrdId1", "OrdId3"]);
}

#[test]
fn test_cancelled_id_can_be_reused() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    cache.cancel_order("OrdId1");
    assert!(!cache.contains_order("OrdId1"));

    cache.add_order(create_test_order("OrdId1", "S2", Side::Sell, 5, "U1", "A"));
    assert_eq!(cache.orders_for_security("S2").len(), 1);
    cache.check_consistency().unwrap();
}

#[test]
fn test_minimum_qty_cancellation() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 50, "U1", "A"));
    cache.add_order(create_test_order("OrdId2", "S1", Side::Sell, 49, "U2", "B"));
    cache.add_order(create_test_order("OrdId3", "S2", Side::Sell, 500, "U3", "C"));
    cache.add_order(create_test_order("OrdId4", "S1", Side::Buy, 75, "U4", "D"));

    assert_eq!(cache.cancel_orders_for_sec_id_with_minimum_qty("S1", 50), 2);
    assert!(cache.orders_for_security("S1").iter().all(|o| o.qty() < 50));
    assert_eq!(sorted_ids(&cache), vec!["OrdId2", "OrdId3"]);
    cache.check_consistency().unwrap();

    assert_eq!(cache.cancel_orders_for_sec_id_with_minimum_qty("S1", 1), 1);
    assert_eq!(cache.security_count(), 1);
    assert!(cache.orders_for_security("S1").is_empty());
    cache.check_consistency().unwrap();
}

#[test]
fn test_minimum_qty_zero_is_noop() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 50, "U1", "A"));
    assert_eq!(cache.cancel_orders_for_sec_id_with_minimum_qty("S1", 0), 0);
    assert_eq!(cache.len(), 1);
}

/// Matching drains quantity, which lowers what a threshold cancellation picks up.
#[test]
fn test_minimum_qty_after_matching() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    cache.add_order(create_test_order("OrdId2", "S1", Side::Sell, 60, "U2", "B"));

    assert_eq!(cache.get_matching_size_for_security("S1"), 60);
    assert_eq!(cache.cancel_orders_for_sec_id_with_minimum_qty("S1", 50), 0);
    assert_eq!(cache.cancel_orders_for_sec_id_with_minimum_qty("S1", 40), 1);
    assert_eq!(sorted_ids(&cache), vec!["OrdId2"]);
}

#[test]
fn test_cancel_for_user_across_securities() {
    let mut cache = OrderCache::new();
    for i in 0..20 {
        let user = if i % 3 == 0 { "Target" } else { "Other" };
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        cache.add_order(create_test_order(
            &format!("OrdId{}", i),
            &format!("S{}", i % 4),
            side,
            10 + i,
            user,
            "A",
        ));
    }

    assert_eq!(cache.cancel_orders_for_user("Target"), 7);
    assert_eq!(cache.len(), 13);
    assert!(cache.get_all_orders().iter().all(|o| o.user() != "Target"));
    cache.check_consistency().unwrap();

    assert_eq!(cache.cancel_orders_for_user("Target"), 0);
    assert_eq!(cache.cancel_orders_for_user("Other"), 13);
    assert!(cache.is_empty());
    assert_eq!(cache.security_count(), 0);
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut cache = OrderCache::new();
    cache.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
    cache.add_order(create_test_order("OrdId2", "S1", Side::Sell, 100, "U2", "B"));

    let snapshot = cache.get_all_orders();
    cache.get_matching_size_for_security("S1");
    cache.cancel_order("OrdId1");

    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().all(|o| o.qty() == 100));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_service_trait_object() {
    let mut cache = OrderCache::new();
    {
        let service: &mut dyn OrderCacheService = &mut cache;
        service.add_order(create_test_order("OrdId1", "S1", Side::Buy, 100, "U1", "A"));
        service.add_order(create_test_order("OrdId2", "S1", Side::Sell, 40, "U2", "B"));
        assert_eq!(service.get_matching_size_for_security("S1"), 40);
        assert_eq!(service.cancel_orders_for_user("U2"), 1);
        assert_eq!(service.get_all_orders().len(), 1);
    }
    cache.check_consistency().unwrap();
}
