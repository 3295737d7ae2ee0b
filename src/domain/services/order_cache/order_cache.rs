//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the in-memory order cache. Three structures are kept mutually
// consistent by every mutator:
//
// | Component           | Description                                                      |
// |---------------------|------------------------------------------------------------------|
// | orders              | Dense store of live orders. Positions move on removal.           |
// | order_ids           | Identifiers of exactly the orders in the store.                  |
// | orders_by_security  | Security id -> positions into the store, in insertion order.     |
//
// Removal is swap-and-pop: the last order moves into the freed slot, which invalidates exactly
// one index entry (the moved order's old position). That entry is rewritten before the
// mutator returns. Positions never leave this module.
//
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                                       | Description                          | Return Type  |
// |--------------------------------------------|--------------------------------------|--------------|
// | add_order                                  | Validates and stores an order        | ()           |
// | try_add_order                              | Same, surfacing the rejection        | Result       |
// | cancel_order                               | Removes one order by id              | ()           |
// | cancel_orders_for_user                     | Removes all orders of a user         | usize        |
// | cancel_orders_for_sec_id_with_minimum_qty  | Removes large orders of a security   | usize        |
// | get_matching_size_for_security             | Consumes matchable quantity          | u64          |
// | get_all_orders                             | Snapshot of the store                | Vec<Order>   |
// | check_consistency                          | Audits the three structures          | Result       |
//--------------------------------------------------------------------------------------------------

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace};

use crate::config::CacheConfig;
use crate::domain::models::types::Order;

use super::matching;
use super::{ConsistencyError, OrderCacheService, OrderRejection};

/// In-memory cache of live orders indexed by identifier and security.
///
/// Not internally synchronized; wrap it in a lock if it has to be shared between threads.
#[derive(Debug, Default)]
pub struct OrderCache {
    /// Dense store, no holes
    orders: Vec<Order>,
    /// Duplicate guard, O(1) existence checks
    order_ids: FxHashSet<String>,
    /// Never holds an empty list
    orders_by_security: FxHashMap<String, Vec<usize>>,
}

impl OrderCache {
    /// Creates an empty cache without reserving any capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with the store and both indices reserved to the configured capacity.
    pub fn with_config(config: &CacheConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            orders: Vec::with_capacity(capacity),
            order_ids: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            orders_by_security: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Adds an order, returning why it was refused if it was.
    ///
    /// # Rejections
    /// * the identifier is already present
    /// * the quantity is zero
    /// * the order id, security id, user or company is empty
    ///
    /// A rejected order leaves the cache untouched.
    pub fn try_add_order(&mut self, order: Order) -> Result<(), OrderRejection> {
        self.validate(&order)?;

        let position = self.orders.len();
        self.order_ids.insert(order.order_id().to_owned());
        self.orders_by_security
            .entry(order.security_id().to_owned())
            .or_default()
            .push(position);
        trace!("Stored order {} at position {}", order.order_id(), position);
        self.orders.push(order);

        Ok(())
    }

    fn validate(&self, order: &Order) -> Result<(), OrderRejection> {
        if self.order_ids.contains(order.order_id()) {
            return Err(OrderRejection::DuplicateOrderId(order.order_id().to_owned()));
        }
        if order.qty() == 0 {
            return Err(OrderRejection::ZeroQuantity(order.order_id().to_owned()));
        }

        let fields = [
            ("order id", order.order_id()),
            ("security id", order.security_id()),
            ("user", order.user()),
            ("company", order.company()),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(OrderRejection::EmptyField {
                field: *field,
                order_id: order.order_id().to_owned(),
            });
        }

        Ok(())
    }

    /// Returns true if an order with this identifier is live.
    #[inline]
    pub fn contains_order(&self, order_id: &str) -> bool {
        self.order_ids.contains(order_id)
    }

    /// Number of live orders.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of securities with at least one live order.
    #[inline]
    pub fn security_count(&self) -> usize {
        self.orders_by_security.len()
    }

    /// Snapshot copy of the orders for one security, in insertion order.
    pub fn orders_for_security(&self, security_id: &str) -> Vec<Order> {
        self.orders_by_security
            .get(security_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| self.orders[position].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes the order at `position` from all three structures and compacts the store.
    fn remove_at(&mut self, position: usize) -> Order {
        let last = self.orders.len() - 1;
        let removed = &self.orders[position];

        self.order_ids.remove(removed.order_id());
        detach_position(&mut self.orders_by_security, removed.security_id(), position);

        if position != last {
            let moved = &self.orders[last];
            if let Some(slot) = self
                .orders_by_security
                .get_mut(moved.security_id())
                .and_then(|positions| positions.iter_mut().find(|p| **p == last))
            {
                *slot = position;
            }
            trace!("Moved order {} from {} to {}", moved.order_id(), last, position);
        }

        self.orders.swap_remove(position)
    }

    /// Removes every order at the given distinct positions.
    fn remove_positions(&mut self, mut positions: Vec<usize>) -> usize {
        // Highest first: the order moved by each swap is never one still waiting to be removed.
        positions.sort_unstable_by(|a, b| b.cmp(a));
        for &position in &positions {
            let removed = self.remove_at(position);
            trace!("Cancelled order {}", removed.order_id());
        }
        positions.len()
    }

    /// Verifies that the store, the identity set and the security index describe the same orders.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        if self.order_ids.len() != self.orders.len() {
            return Err(ConsistencyError::IdentityCountMismatch {
                ids: self.order_ids.len(),
                orders: self.orders.len(),
            });
        }

        let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
        for order in &self.orders {
            if !self.order_ids.contains(order.order_id()) {
                return Err(ConsistencyError::MissingIdentity(order.order_id().to_owned()));
            }
            if !seen_ids.insert(order.order_id()) {
                return Err(ConsistencyError::DuplicateOrder(order.order_id().to_owned()));
            }
        }

        let mut seen_positions: FxHashSet<usize> = FxHashSet::default();
        for (security_id, positions) in &self.orders_by_security {
            if positions.is_empty() {
                return Err(ConsistencyError::EmptySecurityEntry(security_id.clone()));
            }
            for &position in positions {
                let Some(order) = self.orders.get(position) else {
                    return Err(ConsistencyError::DanglingPosition {
                        security_id: security_id.clone(),
                        position,
                    });
                };
                if order.security_id() != security_id {
                    return Err(ConsistencyError::MisindexedPosition {
                        security_id: security_id.clone(),
                        position,
                        actual: order.security_id().to_owned(),
                    });
                }
                if !seen_positions.insert(position) {
                    return Err(ConsistencyError::DuplicatePosition(position));
                }
            }
        }

        if seen_positions.len() != self.orders.len() {
            return Err(ConsistencyError::UnindexedOrders {
                indexed: seen_positions.len(),
                orders: self.orders.len(),
            });
        }

        Ok(())
    }
}

/// Drops `position` from the security's list, keeping the rest in order, and removes the
/// entry once it is empty.
fn detach_position(
    orders_by_security: &mut FxHashMap<String, Vec<usize>>,
    security_id: &str,
    position: usize,
) {
    let Some(positions) = orders_by_security.get_mut(security_id) else {
        return;
    };
    if let Some(index) = positions.iter().position(|&p| p == position) {
        positions.remove(index);
    }
    if positions.is_empty() {
        orders_by_security.remove(security_id);
    }
}

impl OrderCacheService for OrderCache {
    fn add_order(&mut self, order: Order) {
        if let Err(reason) = self.try_add_order(order) {
            debug!("Order rejected: {}", reason);
        }
    }

    fn cancel_order(&mut self, order_id: &str) {
        if !self.order_ids.contains(order_id) {
            return;
        }
        let Some(position) = self.orders.iter().position(|o| o.order_id() == order_id) else {
            return;
        };

        self.remove_at(position);
        debug!("Cancelled order {}", order_id);
    }

    fn cancel_orders_for_user(&mut self, user: &str) -> usize {
        let positions: Vec<usize> = self
            .orders
            .iter()
            .enumerate()
            .filter(|(_, order)| order.user() == user)
            .map(|(position, _)| position)
            .collect();

        let cancelled = self.remove_positions(positions);
        if cancelled > 0 {
            info!("Cancelled {} orders for user {}", cancelled, user);
        }
        cancelled
    }

    fn cancel_orders_for_sec_id_with_minimum_qty(&mut self, security_id: &str, min_qty: u32) -> usize {
        if min_qty == 0 {
            return 0;
        }
        let Some(positions) = self.orders_by_security.get(security_id) else {
            return 0;
        };

        let positions: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&position| self.orders[position].qty() >= min_qty)
            .collect();

        let cancelled = self.remove_positions(positions);
        if cancelled > 0 {
            info!(
                "Cancelled {} orders for security {} with qty >= {}",
                cancelled, security_id, min_qty
            );
        }
        cancelled
    }

    fn get_matching_size_for_security(&mut self, security_id: &str) -> u64 {
        let Some(positions) = self.orders_by_security.get(security_id) else {
            return 0;
        };

        let matched = matching::matching_size(&mut self.orders, positions);
        debug!("Matched {} for security {}", matched, security_id);
        matched
    }

    fn get_all_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }
}
