use serde::{Deserialize, Serialize};

use crate::domain::models::types::{Order, Side, TypeError};

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Structs:                                                 |
/// |   - OrderMessage                                         |
/// | Enums:                                                   |
/// |   - CacheRequest                                         |
/// | Implementations:                                         |
/// |   - TryFrom<OrderMessage> for Order                      |
/// +----------------------------------------------------------+

/// An order as it arrives from a feed, with the side still in its raw textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMessage {
    pub order_id: String,
    pub security_id: String,
    /// Expected to be `Buy` or `Sell`.
    pub side: String,
    pub qty: u32,
    pub user: String,
    pub company: String,
}

/// One request against the cache, as carried by a replay file or a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request_type", rename_all = "snake_case")]
pub enum CacheRequest {
    /// Add an order.
    Place(OrderMessage),

    /// Cancel a single order.
    Cancel { order_id: String },

    /// Cancel all orders of a user.
    CancelUser { user: String },

    /// Cancel the orders of a security at or above a quantity.
    CancelSecurity { security_id: String, min_qty: u32 },
}

impl TryFrom<OrderMessage> for Order {
    type Error = TypeError;

    fn try_from(message: OrderMessage) -> Result<Self, Self::Error> {
        let side: Side = message.side.parse()?;
        Ok(Order::new(
            message.order_id,
            message.security_id,
            side,
            message.qty,
            message.user,
            message.company,
        ))
    }
}
