use super::{Collation, ColumnKind, SortDirection, SortValue};
use std::collections::HashMap;

/// One data row as seen by the sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    /// `data-order-id` of the row
    pub group_key: Option<String>,
    /// Raw text of the sorted cell (badge text for badge columns)
    pub text: String,
}

impl RowSnapshot {
    pub fn new(group_key: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            group_key: group_key.map(str::to_string),
            text: text.into(),
        }
    }
}

/// `Grouped` when the table body has merged order cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Grouped,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShade {
    Even,
    Odd,
}

impl GroupShade {
    pub fn for_group_index(index: usize) -> Self {
        if index % 2 == 0 {
            GroupShade::Even
        } else {
            GroupShade::Odd
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            GroupShade::Even => "order-group-even",
            GroupShade::Odd => "order-group-odd",
        }
    }
}

/// New row order as indices into the snapshot.
///
/// `shades[i]` belongs to `order[i]`; empty in flat mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortPlan {
    pub order: Vec<usize>,
    pub shades: Vec<GroupShade>,
}

/// Compute the new order of `rows`.
///
/// Flat mode sorts every row by its own value. Grouped mode collects rows by
/// group key in first-appearance order and sorts the groups by the value of
/// their first row; groups stay contiguous. The sort is stable in both modes.
pub fn plan_sort(
    column: &str,
    rows: &[RowSnapshot],
    mode: SortMode,
    direction: SortDirection,
    collation: &dyn Collation,
) -> SortPlan {
    let kind = ColumnKind::for_column(column);
    let values: Vec<SortValue> = rows.iter().map(|r| kind.extract(&r.text)).collect();

    match mode {
        SortMode::Flat => {
            let mut order: Vec<usize> = (0..rows.len()).collect();
            order.sort_by(|&a, &b| direction.apply(values[a].compare(&values[b], collation)));
            SortPlan {
                order,
                shades: Vec::new(),
            }
        }
        SortMode::Grouped => {
            let mut groups: Vec<Vec<usize>> = Vec::new();
            let mut by_key: HashMap<Option<&str>, usize> = HashMap::new();
            for (idx, row) in rows.iter().enumerate() {
                let slot = *by_key
                    .entry(row.group_key.as_deref())
                    .or_insert_with(|| {
                        groups.push(Vec::new());
                        groups.len() - 1
                    });
                groups[slot].push(idx);
            }

            groups.sort_by(|a, b| {
                direction.apply(values[a[0]].compare(&values[b[0]], collation))
            });

            let mut plan = SortPlan::default();
            for (group_index, members) in groups.iter().enumerate() {
                let shade = GroupShade::for_group_index(group_index);
                for &idx in members {
                    plan.order.push(idx);
                    plan.shades.push(shade);
                }
            }
            plan
        }
    }
}

/// Row class with its group shade swapped for `shade`. Rows rendered
/// without a shade keep their class as is.
pub fn reshade_class(class: &str, shade: GroupShade) -> String {
    class
        .split_whitespace()
        .map(|t| match t {
            "order-group-even" | "order-group-odd" => shade.class_name(),
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_sort::CodepointCollation;

    fn texts(rows: &[RowSnapshot], plan: &SortPlan) -> Vec<String> {
        plan.order.iter().map(|&i| rows[i].text.clone()).collect()
    }

    #[test]
    fn grouped_sort_keeps_groups_contiguous() {
        let rows = vec![
            RowSnapshot::new(Some("A"), "300"),
            RowSnapshot::new(Some("A"), "1"),
            RowSnapshot::new(Some("B"), "200"),
            RowSnapshot::new(Some("B"), "999"),
            RowSnapshot::new(Some("C"), "100"),
        ];
        let plan = plan_sort(
            "payment_amount",
            &rows,
            SortMode::Grouped,
            SortDirection::Asc,
            &CodepointCollation,
        );
        assert_eq!(plan.order, vec![4, 2, 3, 0, 1]);
        assert_eq!(
            plan.shades,
            vec![
                GroupShade::Even,
                GroupShade::Odd,
                GroupShade::Odd,
                GroupShade::Even,
                GroupShade::Even
            ]
        );
    }

    #[test]
    fn grouped_pairs_sorted_descending_by_representative() {
        let rows = vec![
            RowSnapshot::new(Some("C"), "1"),
            RowSnapshot::new(Some("C"), "1"),
            RowSnapshot::new(Some("A"), "3"),
            RowSnapshot::new(Some("A"), "0"),
            RowSnapshot::new(Some("B"), "2"),
            RowSnapshot::new(Some("B"), "9"),
        ];
        let plan = plan_sort("order_id", &rows, SortMode::Grouped, SortDirection::Desc, &CodepointCollation);
        assert_eq!(plan.order, vec![2, 3, 4, 5, 0, 1]);
    }

    #[test]
    fn numeric_flat_sort_treats_placeholder_as_zero() {
        let rows: Vec<_> = ["10", "2", "-", "7"]
            .iter()
            .map(|t| RowSnapshot::new(None, *t))
            .collect();
        let plan = plan_sort("order_id", &rows, SortMode::Flat, SortDirection::Asc, &CodepointCollation);
        assert_eq!(texts(&rows, &plan), vec!["-", "2", "7", "10"]);
        assert!(plan.shades.is_empty());
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let rows: Vec<_> = [("X", "나"), ("Y", "가"), ("Z", "나"), ("W", "다")]
            .iter()
            .map(|(k, t)| RowSnapshot::new(Some(*k), *t))
            .collect();
        for mode in [SortMode::Flat, SortMode::Grouped] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let first = plan_sort("customer_name", &rows, mode, direction, &CodepointCollation);
                let reordered: Vec<_> = first.order.iter().map(|&i| rows[i].clone()).collect();
                let second =
                    plan_sort("customer_name", &reordered, mode, direction, &CodepointCollation);
                assert_eq!(second.order, (0..rows.len()).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn ties_keep_original_order_in_both_directions() {
        let rows = vec![
            RowSnapshot::new(None, "결제 완료"),
            RowSnapshot::new(None, "미결제"),
            RowSnapshot::new(None, "결제 완료"),
            RowSnapshot::new(None, "미결제"),
        ];
        let asc = plan_sort("payment_status", &rows, SortMode::Flat, SortDirection::Asc, &CodepointCollation);
        assert_eq!(asc.order, vec![1, 3, 0, 2]);
        let desc = plan_sort("payment_status", &rows, SortMode::Flat, SortDirection::Desc, &CodepointCollation);
        assert_eq!(desc.order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn korean_text_order() {
        let rows: Vec<_> = ["홍길동", "김철수", "박영희"]
            .iter()
            .map(|t| RowSnapshot::new(None, *t))
            .collect();
        let plan = plan_sort("customer_name", &rows, SortMode::Flat, SortDirection::Asc, &CodepointCollation);
        assert_eq!(texts(&rows, &plan), vec!["김철수", "박영희", "홍길동"]);
    }

    #[test]
    fn rows_without_group_key_form_one_group() {
        let rows = vec![
            RowSnapshot::new(None, "2"),
            RowSnapshot::new(Some("A"), "1"),
            RowSnapshot::new(None, "5"),
        ];
        let plan = plan_sort("order_id", &rows, SortMode::Grouped, SortDirection::Asc, &CodepointCollation);
        assert_eq!(plan.order, vec![1, 0, 2]);
    }

    #[test]
    fn reshade_replaces_previous_shade() {
        assert_eq!(
            reshade_class("data-row order-group-odd selected", GroupShade::Even),
            "data-row order-group-even selected"
        );
    }

    #[test]
    fn reshade_leaves_unshaded_rows_alone() {
        assert_eq!(reshade_class("data-row selected", GroupShade::Odd), "data-row selected");
        assert_eq!(reshade_class("", GroupShade::Even), "");
    }
}
