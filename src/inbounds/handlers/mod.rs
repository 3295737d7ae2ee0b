/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - cancel_handler                                       |
/// |   - place_handler                                        |
/// | Functions:                                               |
/// |   - handle_request                                       |
/// |   - handle_payload                                       |
/// +----------------------------------------------------------+
use crate::domain::services::order_cache::OrderCacheService;
use crate::inbounds::dtos::CacheRequest;

use super::inbound_error::InboundError;

/// Handler for cancellation requests
pub mod cancel_handler;

/// Handler for order placement requests
pub mod place_handler;

/// Routes a decoded request to the matching cache operation.
pub fn handle_request<C: OrderCacheService + ?Sized>(cache: &mut C, request: CacheRequest) {
    match request {
        CacheRequest::Place(message) => place_handler::place_order_message(cache, message),
        cancel => cancel_handler::apply_cancel(cache, cancel),
    }
}

/// Decodes a JSON request and applies it to the cache.
pub fn handle_payload<C: OrderCacheService + ?Sized>(
    cache: &mut C,
    payload: &[u8],
) -> Result<(), InboundError> {
    let request: CacheRequest = serde_json::from_slice(payload)
        .map_err(|e| InboundError::BadRequest(format!("Invalid cache request: {}", e)))?;
    handle_request(cache, request);
    Ok(())
}
