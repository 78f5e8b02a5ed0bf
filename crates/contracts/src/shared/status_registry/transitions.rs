//! Status transition policy.
//!
//! The page historically offered every status in the dropdown even though a
//! transition table was declared. Both behaviors are available; the
//! integrator picks one through `AdminConfig::enforce_transitions`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Decides whether moving from `from` to `to` is offered to the user
pub trait TransitionPolicy {
    fn is_allowed(&self, from: &str, to: &str) -> bool;
}

/// Every status may be chosen from every status
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllTransitions;

impl TransitionPolicy for AllowAllTransitions {
    fn is_allowed(&self, _from: &str, _to: &str) -> bool {
        true
    }
}

/// Only the transitions of the declared table are allowed
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTransitions;

static DECLARED: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "received",
            &["payment_completed", "impossible", "cancelled"][..],
        ),
        ("payment_completed", &["in_progress", "cancelled"][..]),
        ("in_progress", &["work_completed", "impossible"][..]),
        ("work_completed", &["sent"][..]),
        ("sent", &[][..]),
        ("impossible", &["cancelled", "refunded"][..]),
        ("cancelled", &["refunded"][..]),
        ("refunded", &[][..]),
    ])
});

/// Declared successors of `code`; empty for terminal or unknown codes
pub fn allowed_next(code: &str) -> &'static [&'static str] {
    DECLARED.get(code).copied().unwrap_or(&[])
}

impl TransitionPolicy for DeclaredTransitions {
    fn is_allowed(&self, from: &str, to: &str) -> bool {
        allowed_next(from).contains(&to)
    }
}

/// Policy selected by configuration
pub fn policy(enforce: bool) -> &'static dyn TransitionPolicy {
    if enforce {
        &DeclaredTransitions
    } else {
        &AllowAllTransitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(allowed_next("sent").is_empty());
        assert!(allowed_next("refunded").is_empty());
        assert!(allowed_next("unknown").is_empty());
    }

    #[test]
    fn declared_policy() {
        let p = DeclaredTransitions;
        assert!(p.is_allowed("work_completed", "sent"));
        assert!(!p.is_allowed("sent", "received"));
        assert!(!p.is_allowed("received", "received"));
    }

    #[test]
    fn policy_selection() {
        assert!(policy(false).is_allowed("sent", "received"));
        assert!(!policy(true).is_allowed("sent", "received"));
    }
}
