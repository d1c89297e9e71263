use crate::iterator::{BoxedIterator, IteratorBase, IteratorType, QueryIterator, indent};
use crate::stats::IteratorStats;
use crate::value::Value;

/// Matches nothing. Optimizers substitute it for subtrees proven empty.
pub struct NullIterator {
    base: IteratorBase,
}

impl NullIterator {
    pub fn new() -> Self {
        Self { base: IteratorBase::new() }
    }
}

impl Default for NullIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryIterator for NullIterator {
    fn base(&self) -> &IteratorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut IteratorBase {
        &mut self.base
    }

    fn reset(&mut self) {
        self.base.clear_last();
    }

    fn close(&mut self) {}

    fn clone_iter(&self) -> BoxedIterator {
        Box::new(NullIterator { base: self.base.cloned_tags() })
    }

    fn next(&mut self) -> Option<Value> {
        None
    }

    fn check(&mut self, value: &Value) -> bool {
        self.base.set_last(value.clone());
        false
    }

    fn iterator_type(&self) -> IteratorType {
        IteratorType::Null
    }

    fn debug_string(&self, width: usize) -> String {
        format!("{}({} tags:{})", indent(width), self.iterator_type(), self.base.tags())
    }

    fn optimize(&mut self) -> Option<BoxedIterator> {
        None
    }

    fn stats(&self) -> IteratorStats {
        IteratorStats::default()
    }
}
