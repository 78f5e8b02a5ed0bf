use contracts::shared::table_sort::{CodepointCollation, Collation};
use js_sys::{Array, Function, Intl, Object};
use std::cmp::Ordering;
use wasm_bindgen::JsValue;

/// Text comparison through `Intl.Collator` for the `ko` locale.
pub struct KoreanCollator {
    compare: Function,
}

impl KoreanCollator {
    pub fn new() -> Self {
        let locales = Array::of1(&JsValue::from_str("ko"));
        let collator = Intl::Collator::new(&locales, &Object::new());
        Self {
            compare: collator.compare(),
        }
    }
}

impl Default for KoreanCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl Collation for KoreanCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let result = self
            .compare
            .call2(&JsValue::NULL, &JsValue::from_str(a), &JsValue::from_str(b))
            .ok()
            .and_then(|v| v.as_f64());
        match result {
            Some(n) if n < 0.0 => Ordering::Less,
            Some(n) if n > 0.0 => Ordering::Greater,
            Some(_) => Ordering::Equal,
            None => CodepointCollation.compare(a, b),
        }
    }
}
