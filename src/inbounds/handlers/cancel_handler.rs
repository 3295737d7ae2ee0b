use tracing::info;

use crate::domain::services::order_cache::OrderCacheService;
use crate::inbounds::dtos::CacheRequest;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Functions:                                               |
/// |   - apply_cancel                                         |
/// +----------------------------------------------------------+

/// Applies one of the cancellation requests to the cache.
///
/// Unknown orders, users and securities remove nothing. A `Place` request is ignored here.
pub fn apply_cancel<C: OrderCacheService + ?Sized>(cache: &mut C, request: CacheRequest) {
    match request {
        CacheRequest::Cancel { order_id } => {
            info!("Cancelling order: {}", order_id);
            cache.cancel_order(&order_id);
        }
        CacheRequest::CancelUser { user } => {
            let removed = cache.cancel_orders_for_user(&user);
            info!("Cancelled {} orders for user: {}", removed, user);
        }
        CacheRequest::CancelSecurity { security_id, min_qty } => {
            let removed = cache.cancel_orders_for_sec_id_with_minimum_qty(&security_id, min_qty);
            info!(
                "Cancelled {} orders for security {} with qty >= {}",
                removed, security_id, min_qty
            );
        }
        CacheRequest::Place(_) => {}
    }
}
