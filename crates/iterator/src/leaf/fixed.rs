use crate::iterator::{
    BoxedIterator, IteratorBase, IteratorType, QueryIterator, check_log_in, check_log_out, indent, next_log_out,
};
use crate::leaf::NullIterator;
use crate::stats::IteratorStats;
use crate::value::Value;

/// Iterates over a fixed, caller-supplied list of values.
pub struct FixedIterator {
    base: IteratorBase,
    values: Vec<Value>,
    index: usize,
}

impl FixedIterator {
    pub fn new() -> Self {
        Self { base: IteratorBase::new(), values: Vec::new(), index: 0 }
    }

    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut it = Self::new();
        for value in values {
            it.add(value.into());
        }
        it
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn with_fixed_tag(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.add_fixed_tag(tag, value.into());
        self
    }

    pub fn add(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Default for FixedIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryIterator for FixedIterator {
    fn base(&self) -> &IteratorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut IteratorBase {
        &mut self.base
    }

    fn reset(&mut self) {
        self.index = 0;
        self.base.clear_last();
    }

    fn close(&mut self) {}

    fn clone_iter(&self) -> BoxedIterator {
        let mut out = FixedIterator::from_values(self.values.iter().cloned());
        out.base.copy_tags_from(&self.base);
        Box::new(out)
    }

    fn next(&mut self) -> Option<Value> {
        let value = self.values.get(self.index).cloned();
        if let Some(v) = &value {
            self.index += 1;
            self.base.set_last(v.clone());
        }
        next_log_out(&*self, value)
    }

    // Linear scan; fixed sets are expected to be small.
    fn check(&mut self, value: &Value) -> bool {
        check_log_in(&*self, value);
        let matched = self.values.contains(value);
        self.base.set_last(value.clone());
        check_log_out(&*self, value, matched)
    }

    fn iterator_type(&self) -> IteratorType {
        IteratorType::Fixed
    }

    fn debug_string(&self, width: usize) -> String {
        format!(
            "{}({} #{} tags:{} size:{})",
            indent(width),
            self.iterator_type(),
            self.uid(),
            self.base.tags(),
            self.values.len()
        )
    }

    fn optimize(&mut self) -> Option<BoxedIterator> {
        if !self.values.is_empty() {
            return None;
        }
        let mut null = NullIterator::new();
        null.base_mut().copy_tags_from(&self.base);
        Some(Box::new(null))
    }

    fn stats(&self) -> IteratorStats {
        let size = self.values.len() as u64;
        IteratorStats::new(u64::from(size.max(1).ilog2()) + 1, 1, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::values;

    #[test]
    fn next_yields_values_in_insertion_order_then_stops() {
        let mut it = FixedIterator::from_values([3u64, 1, 2]);
        let seen: Vec<Value> = values(&mut it).collect();
        assert_eq!(seen, vec![Value::from(3u64), Value::from(1u64), Value::from(2u64)]);
        assert_eq!(it.next(), None);
        assert_eq!(it.last(), Some(&Value::from(2u64)));
    }

    #[test]
    fn reset_restarts_enumeration() {
        let mut it = FixedIterator::from_values(["a"]);
        assert_eq!(it.next(), Some(Value::from("a")));
        assert_eq!(it.next(), None);
        it.reset();
        assert_eq!(it.last(), None);
        assert_eq!(it.next(), Some(Value::from("a")));
    }

    #[test]
    fn stats_grow_logarithmically_in_check_cost() {
        assert_eq!(FixedIterator::new().stats(), IteratorStats::new(1, 1, 0));
        assert_eq!(FixedIterator::from_values(0u64..8).stats(), IteratorStats::new(4, 1, 8));
    }
}
