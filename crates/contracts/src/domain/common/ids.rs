use serde::{Deserialize, Serialize};
use std::fmt;

/// Order identifier as rendered in `data-order-id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

/// Request identifier as rendered in `data-request-id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Request id of the `index`-th file of an order: order id followed by a
    /// two digit sequence number.
    pub fn for_file(order_id: &OrderId, index: usize) -> Self {
        Self(format!("{}{:02}", order_id.0, index))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_for_file_is_zero_padded() {
        let order = OrderId::new("250301001");
        assert_eq!(RequestId::for_file(&order, 0).as_str(), "25030100100");
        assert_eq!(RequestId::for_file(&order, 7).as_str(), "25030100107");
        assert_eq!(RequestId::for_file(&order, 12).as_str(), "25030100112");
    }
}
