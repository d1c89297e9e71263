use crate::iterator::{
    BoxedIterator, IteratorBase, IteratorType, QueryIterator, check_log_in, check_log_out, indent, next_log_out,
};
use crate::stats::IteratorStats;
use crate::value::Value;

/// Every numeric id in the inclusive range `[min, max]`.
///
/// Stores hand out dense ids, so "all nodes" is a plain range scan.
pub struct AllIterator {
    base: IteratorBase,
    min: u64,
    max: u64,
    cursor: Option<u64>,
}

impl AllIterator {
    pub fn new(min: u64, max: u64) -> Self {
        Self { base: IteratorBase::new(), min, max, cursor: Some(min) }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    fn contains(&self, id: u64) -> bool {
        self.min <= id && id <= self.max
    }
}

impl QueryIterator for AllIterator {
    fn base(&self) -> &IteratorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut IteratorBase {
        &mut self.base
    }

    fn reset(&mut self) {
        self.cursor = Some(self.min);
        self.base.clear_last();
    }

    fn close(&mut self) {}

    fn clone_iter(&self) -> BoxedIterator {
        let mut out = AllIterator::new(self.min, self.max);
        out.base.copy_tags_from(&self.base);
        Box::new(out)
    }

    fn next(&mut self) -> Option<Value> {
        let value = match self.cursor {
            Some(id) if self.contains(id) => {
                self.cursor = id.checked_add(1);
                self.base.set_last(Value::Id(id));
                Some(Value::Id(id))
            }
            _ => {
                self.cursor = None;
                None
            }
        };
        next_log_out(&*self, value)
    }

    fn check(&mut self, value: &Value) -> bool {
        check_log_in(&*self, value);
        let matched = value.as_id().is_some_and(|id| self.contains(id));
        self.base.set_last(value.clone());
        check_log_out(&*self, value, matched)
    }

    fn iterator_type(&self) -> IteratorType {
        IteratorType::All
    }

    fn debug_string(&self, width: usize) -> String {
        format!(
            "{}({} #{} tags:{} range:{}..={})",
            indent(width),
            self.iterator_type(),
            self.uid(),
            self.base.tags(),
            self.min,
            self.max
        )
    }

    fn optimize(&mut self) -> Option<BoxedIterator> {
        None
    }

    fn stats(&self) -> IteratorStats {
        let size = if self.max < self.min { 0 } else { (self.max - self.min).saturating_add(1) };
        IteratorStats::new(1, 1, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iterator::values;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(4u64), true)]
    #[case(Value::from(6u64), true)]
    #[case(Value::from(3u64), false)]
    #[case(Value::from(7u64), false)]
    #[case(Value::from("5"), false)]
    fn check_accepts_ids_inside_range(#[case] value: Value, #[case] expected: bool) {
        let mut it = AllIterator::new(4, 6);
        assert_eq!(it.check(&value), expected);
        assert_eq!(it.last(), Some(&value));
    }

    #[test]
    fn next_walks_the_whole_range() {
        let mut it = AllIterator::new(1, 3);
        let seen: Vec<u64> = values(&mut it).filter_map(|v| v.as_id()).collect();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(it.stats().size, 3);
    }

    #[test]
    fn range_ending_at_max_id_terminates() {
        let mut it = AllIterator::new(u64::MAX - 1, u64::MAX);
        assert_eq!(values(&mut it).count(), 2);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn inverted_range_is_empty() {
        let mut it = AllIterator::new(5, 2);
        assert_eq!(it.next(), None);
        assert_eq!(it.stats().size, 0);
    }
}
