//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types held by the order cache: the resting order record and
// its side.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | ENUMS              | Side of an order (Buy/Sell).                                     |
// | STRUCTS            | The Order record.                                                |
// | Potential Errors   | Errors raised when converting raw values into typed ones.        |
// | TESTS              | Unit tests for the defined types.                                |
//--------------------------------------------------------------------------------------------------

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
//  ENUMS
//--------------------------------------------------------------------------------------------------

/// Represents the side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// A buy order.
    Buy,
    /// A sell order.
    Sell,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TypeError;

    /// Only the exact tokens `Buy` and `Sell` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Self::Buy),
            "Sell" => Ok(Self::Sell),
            other => Err(TypeError::InvalidSide(other.to_string())),
        }
    }
}

//--------------------------------------------------------------------------------------------------
//  STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                   |
// |---------------|-----------------------------------------------|
// | Order         | A resting order held by the cache.            |
//--------------------------------------------------------------------------------------------------

/// A resting buy or sell order.
///
/// Identity fields are only readable; the quantity is the one mutable attribute and is
/// decremented by matching while the order sits in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    order_id: String,
    security_id: String,
    side: Side,
    qty: u32,
    user: String,
    company: String,
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        security_id: impl Into<String>,
        side: Side,
        qty: u32,
        user: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            security_id: security_id.into(),
            side,
            qty,
            user: user.into(),
            company: company.into(),
        }
    }

    /// Unique order identifier.
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Identifier of the security this order targets.
    #[inline]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Remaining quantity.
    #[inline]
    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// Account owning the order.
    #[inline]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Firm the owning user belongs to.
    #[inline]
    pub fn company(&self) -> &str {
        &self.company
    }

    pub(crate) fn set_qty(&mut self, qty: u32) {
        self.qty = qty;
    }
}

//--------------------------------------------------------------------------------------------------
//  Potential Errors
//--------------------------------------------------------------------------------------------------

/// Errors raised when converting raw values into the types of this module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid side specified: {0}")]
    InvalidSide(String),
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
// | Name                       | Description                                      |
// |----------------------------|--------------------------------------------------|
// | test_order_creation        | Verify Order construction and accessors.         |
// | test_side_parsing          | Exact Buy/Sell tokens parse, others do not.      |
// | test_side_serde            | Side (de)serializes as its token.                |
// | test_type_error            | Error message formatting.                        |
//--------------------------------------------------------------------------------------------------
