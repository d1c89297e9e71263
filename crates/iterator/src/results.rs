//! Result enumeration for a single candidate value.

use crate::iterator::QueryIterator;
use crate::tags::Bindings;
use crate::value::Value;

/// Checks `value` against the tree rooted at `it` and collects one row per
/// binding set. A rejected value yields no rows.
pub fn result_rows(it: &mut dyn QueryIterator, value: &Value) -> Vec<Bindings> {
    let mut rows = Vec::new();
    if !it.check(value) {
        return rows;
    }
    loop {
        let mut row = Bindings::new();
        it.tag_results(&mut row);
        rows.push(row);
        if !it.next_result() {
            break;
        }
    }
    tracing::trace!(uid = it.uid(), %value, rows = rows.len(), "collected result rows");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{FixedIterator, NullIterator};
    use crate::tags::intern_tag;

    #[test]
    fn rejected_value_has_no_rows() {
        let mut it = NullIterator::new();
        assert!(result_rows(&mut it, &Value::from(1u64)).is_empty());
    }

    #[test]
    fn accepted_value_has_one_row_with_tags() {
        let mut it = FixedIterator::from_values(["a"]).with_tag("x").with_fixed_tag("kind", "letter");
        let rows = result_rows(&mut it, &Value::from("a"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(&intern_tag("x")), Some(&Value::from("a")));
        assert_eq!(rows[0].get(&intern_tag("kind")), Some(&Value::from("letter")));
    }
}
