use std::cmp::Ordering;

/// String comparison used for text columns
pub trait Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Unicode code point order after case folding, raw order as tie-break.
///
/// Precomposed Hangul syllables are laid out in dictionary order, so this
/// matches the browser's Korean collation for the text the table shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollation;

impl Collation for CodepointCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    }
}

impl<F> Collation for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_dictionary_order() {
        let c = CodepointCollation;
        assert_eq!(c.compare("가나", "나다"), Ordering::Less);
        assert_eq!(c.compare("하", "다"), Ordering::Greater);
        assert_eq!(c.compare("", "가"), Ordering::Less);
    }

    #[test]
    fn case_is_folded_first() {
        let c = CodepointCollation;
        assert_eq!(c.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(c.compare("a", "a"), Ordering::Equal);
    }

    #[test]
    fn closures_are_collations() {
        let reversed = |a: &str, b: &str| b.cmp(a);
        assert_eq!(reversed.compare("a", "b"), Ordering::Greater);
    }
}
