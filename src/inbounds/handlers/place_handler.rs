use tracing::{debug, info};

use crate::domain::models::types::Order;
use crate::domain::services::order_cache::OrderCacheService;
use crate::inbounds::dtos::OrderMessage;

use super::super::inbound_error::InboundError;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - place_order_message                                  |
/// |   - handle_place_request                                 |
/// +----------------------------------------------------------+

/// Converts an order message and hands it to the cache.
///
/// A message whose side is neither `Buy` nor `Sell` never reaches the cache; like any other
/// invalid order it is dropped without a signal to the caller.
pub fn place_order_message<C: OrderCacheService + ?Sized>(cache: &mut C, message: OrderMessage) {
    let order_id = message.order_id.clone();
    match Order::try_from(message) {
        Ok(order) => cache.add_order(order),
        Err(e) => debug!("Dropping order {}: {}", order_id, e),
    }
}

/// Processes an order placement request from a JSON payload.
///
/// # Error Handling
///
/// * Deserialization errors are converted to `InboundError::BadRequest`
/// * Orders refused by the cache are not errors
pub fn handle_place_request<C: OrderCacheService + ?Sized>(
    request: &[u8],
    cache: &mut C,
) -> Result<(), InboundError> {
    let message: OrderMessage = serde_json::from_slice(request)
        .map_err(|e| InboundError::BadRequest(format!("Invalid place request: {}", e)))?;

    info!("Placing order: {}", message.order_id);
    place_order_message(cache, message);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::order_cache::OrderCache;

    fn create_test_message(order_id: &str, side: &str) -> OrderMessage {
        OrderMessage {
            order_id: order_id.to_string(),
            security_id: "SecId1".to_string(),
            side: side.to_string(),
            qty: 100,
            user: "User1".to_string(),
            company: "CompanyA".to_string(),
        }
    }

    #[test]
    fn test_valid_message_is_added() {
        let mut cache = OrderCache::new();
        place_order_message(&mut cache, create_test_message("OrdId1", "Buy"));
        place_order_message(&mut cache, create_test_message("OrdId2", "Sell"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_unknown_side_leaves_cache_unchanged() {
        let mut cache = OrderCache::new();
        place_order_message(&mut cache, create_test_message("OrdId1", "Buy"));
        let before = cache.get_all_orders();

        place_order_message(&mut cache, create_test_message("OrdId2", "Hold"));
        place_order_message(&mut cache, create_test_message("OrdId3", ""));

        assert_eq!(cache.get_all_orders(), before);
        assert!(!cache.contains_order("OrdId2"));
        cache.check_consistency().unwrap();
    }

    #[test]
    fn test_handle_place_request() {
        let mut cache = OrderCache::new();
        let payload = serde_json::to_vec(&create_test_message("OrdId1", "Sell")).unwrap();
        handle_place_request(&payload, &mut cache).unwrap();
        assert!(cache.contains_order("OrdId1"));

        let err = handle_place_request(b"[]", &mut cache).unwrap_err();
        assert!(err.to_string().contains("Invalid place request"));
    }
}
