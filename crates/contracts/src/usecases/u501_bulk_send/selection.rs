use crate::domain::common::EntityKind;
use crate::error::ApiError;
use serde::Serialize;
use std::collections::HashSet;

/// Ids read from the checked row checkboxes: blanks dropped, duplicates
/// collapsed, first occurrence kept.
pub fn collect_ids<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .flatten()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Fails with the "nothing selected" message when `ids` is empty
pub fn require_selection(kind: EntityKind, ids: Vec<String>) -> Result<Vec<String>, ApiError> {
    if ids.is_empty() {
        return Err(ApiError::precondition(kind.empty_selection_message()));
    }
    Ok(ids)
}

/// `{order_ids: [...]}` or `{request_ids: [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SendIds {
    Orders { order_ids: Vec<String> },
    Requests { request_ids: Vec<String> },
}

impl SendIds {
    pub fn new(kind: EntityKind, ids: Vec<String>) -> Self {
        match kind {
            EntityKind::Order => SendIds::Orders { order_ids: ids },
            EntityKind::Request => SendIds::Requests { request_ids: ids },
        }
    }

    pub fn ids(&self) -> &[String] {
        match self {
            SendIds::Orders { order_ids } => order_ids,
            SendIds::Requests { request_ids } => request_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_ids_dedups_and_drops_blanks() {
        let ids = collect_ids(vec![Some("O1"), None, Some("O2"), Some(" "), Some("O1"), Some("O3")]);
        assert_eq!(ids, vec!["O1", "O2", "O3"]);
    }

    #[test]
    fn empty_selection_is_a_precondition_failure() {
        let err = require_selection(EntityKind::Request, Vec::new()).unwrap_err();
        assert_eq!(err, ApiError::Precondition("선택된 요청이 없습니다.".into()));
        assert!(require_selection(EntityKind::Order, vec!["O1".into()]).is_ok());
    }

    #[test]
    fn send_ids_body() {
        let body = SendIds::new(EntityKind::Order, vec!["O1".into()]);
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"order_ids": ["O1"]}));
        let body = SendIds::new(EntityKind::Request, vec!["R1".into()]);
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"request_ids": ["R1"]}));
    }
}
