use serde::{Deserialize, Serialize};

/// Which rows receive the new payment badge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPropagation {
    /// Every row rendered for the edited row's order
    #[default]
    WholeOrder,
    EditedRowOnly,
}

/// Payment cell as seen on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRef {
    pub request_id: String,
    pub order_id: Option<String>,
}

impl RowRef {
    pub fn new(request_id: impl Into<String>, order_id: Option<&str>) -> Self {
        Self {
            request_id: request_id.into(),
            order_id: order_id.map(str::to_string),
        }
    }
}

/// Indices of `rows` whose payment badge must be patched after `edited`
/// changed. Empty when the edited row is not on the page.
pub fn payment_targets(rows: &[RowRef], edited: &str, mode: PaymentPropagation) -> Vec<usize> {
    let Some(edited_row) = rows.iter().find(|r| r.request_id == edited) else {
        return Vec::new();
    };
    let order_id = match (mode, edited_row.order_id.as_deref()) {
        (PaymentPropagation::WholeOrder, Some(order_id)) if !order_id.is_empty() => order_id,
        _ => {
            return rows
                .iter()
                .enumerate()
                .filter(|(_, r)| r.request_id == edited)
                .map(|(i, _)| i)
                .collect();
        }
    };
    rows.iter()
        .enumerate()
        .filter(|(_, r)| r.order_id.as_deref() == Some(order_id))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<RowRef> {
        vec![
            RowRef::new("O101", Some("O1")),
            RowRef::new("O201", Some("O2")),
            RowRef::new("O102", Some("O1")),
            RowRef::new("X01", None),
        ]
    }

    #[test]
    fn whole_order_patches_every_row_of_the_order() {
        assert_eq!(payment_targets(&rows(), "O102", PaymentPropagation::WholeOrder), vec![0, 2]);
    }

    #[test]
    fn edited_row_only() {
        assert_eq!(payment_targets(&rows(), "O102", PaymentPropagation::EditedRowOnly), vec![2]);
    }

    #[test]
    fn row_without_order_patches_itself() {
        assert_eq!(payment_targets(&rows(), "X01", PaymentPropagation::WholeOrder), vec![3]);
    }

    #[test]
    fn missing_row_yields_nothing() {
        assert!(payment_targets(&rows(), "nope", PaymentPropagation::WholeOrder).is_empty());
    }
}
