use thiserror::Error;

use crate::domain::models::types::Order;

pub mod matching;
pub mod order_cache;

/// Re-export key types for convenience
pub use self::order_cache::OrderCache;

/// The boundary surface of the cache consumed by ingestion, risk and reporting layers.
///
/// Mutators either apply all of their structural edits or none of them. Unknown identifiers,
/// users and securities are no-ops, and invalid orders are dropped without a signal.
pub trait OrderCacheService {
    /// Adds an order, silently dropping duplicates and invalid orders.
    fn add_order(&mut self, order: Order);

    /// Removes the order with this identifier, if present.
    fn cancel_order(&mut self, order_id: &str);

    /// Removes every order owned by `user`. Returns how many were removed.
    fn cancel_orders_for_user(&mut self, user: &str) -> usize;

    /// Removes every order for `security_id` with a quantity of at least `min_qty`.
    /// A `min_qty` of zero removes nothing. Returns how many were removed.
    fn cancel_orders_for_sec_id_with_minimum_qty(&mut self, security_id: &str, min_qty: u32) -> usize;

    /// Pairs buy and sell quantity for the security, excluding same-company pairs, and returns
    /// the total matched. Matched quantity is consumed from the resting orders.
    fn get_matching_size_for_security(&mut self, security_id: &str) -> u64;

    /// Snapshot copy of every live order, in store order.
    fn get_all_orders(&self) -> Vec<Order>;
}

/// Reasons an order is refused by the cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("Order {0} already exists in the cache")]
    DuplicateOrderId(String),

    #[error("Order {0} has zero quantity")]
    ZeroQuantity(String),

    #[error("Order {order_id:?} has an empty {field}")]
    EmptyField {
        field: &'static str,
        order_id: String,
    },
}

/// A broken relationship between the order store, the identity set and the security index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Identity set holds {ids} identifiers but the store holds {orders} orders")]
    IdentityCountMismatch { ids: usize, orders: usize },

    #[error("Order {0} is stored but missing from the identity set")]
    MissingIdentity(String),

    #[error("Order {0} is stored more than once")]
    DuplicateOrder(String),

    #[error("Security {0} has an empty index entry")]
    EmptySecurityEntry(String),

    #[error("Security {security_id} indexes position {position} past the end of the store")]
    DanglingPosition { security_id: String, position: usize },

    #[error("Security {security_id} indexes position {position} holding an order for {actual}")]
    MisindexedPosition {
        security_id: String,
        position: usize,
        actual: String,
    },

    #[error("Position {0} is indexed more than once")]
    DuplicatePosition(usize),

    #[error("Index covers {indexed} positions but the store holds {orders} orders")]
    UnindexedOrders { indexed: usize, orders: usize },
}
