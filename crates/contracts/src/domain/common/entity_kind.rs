use serde::{Deserialize, Serialize};

/// The two entity kinds rendered by the admin table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Order,
    Request,
}

impl EntityKind {
    /// Code used by the server-rendered template ("order" / "request")
    pub fn code(&self) -> &'static str {
        match self {
            EntityKind::Order => "order",
            EntityKind::Request => "request",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "order" => Some(EntityKind::Order),
            "request" => Some(EntityKind::Request),
            _ => None,
        }
    }

    /// Row/checkbox attribute carrying the id of this kind
    pub fn id_attribute(&self) -> &'static str {
        match self {
            EntityKind::Order => "data-order-id",
            EntityKind::Request => "data-request-id",
        }
    }

    /// Noun used in user messages ("주문" / "요청")
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Order => "주문",
            EntityKind::Request => "요청",
        }
    }

    /// Message shown when nothing is selected
    pub fn empty_selection_message(&self) -> String {
        format!("선택된 {}이 없습니다.", self.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [EntityKind::Order, EntityKind::Request] {
            assert_eq!(EntityKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EntityKind::from_code("payment"), None);
    }

    #[test]
    fn empty_selection_message() {
        assert_eq!(EntityKind::Order.empty_selection_message(), "선택된 주문이 없습니다.");
        assert_eq!(EntityKind::Request.empty_selection_message(), "선택된 요청이 없습니다.");
    }
}
