//! Helpers for testing iterators and the code that drives them.
//!
//! [`ProbeIterator`] wraps any iterator, counts the calls it receives and can
//! pretend to offer several binding sets per matching value or to be replaced
//! by the optimizer. The counters live in a shared [`ProbeCalls`] handle so a
//! test can keep observing the probe after handing ownership to a parent.

use crate::iterator::{BoxedIterator, IteratorBase, IteratorType, QueryIterator, indent};
use crate::stats::IteratorStats;
use crate::tags::Bindings;
use crate::value::Value;
use std::cell::Cell;
use std::rc::Rc;

pub use crate::diagnostics::RecordingSink;

pub const PROBE_TYPE: IteratorType = IteratorType::Custom("probe");

/// Call counters of a [`ProbeIterator`].
#[derive(Debug, Default)]
pub struct ProbeCalls {
    check: Cell<usize>,
    next: Cell<usize>,
    next_result: Cell<usize>,
    tag_results: Cell<usize>,
    reset: Cell<usize>,
    close: Cell<usize>,
    optimize: Cell<usize>,
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl ProbeCalls {
    pub fn check(&self) -> usize {
        self.check.get()
    }

    pub fn next(&self) -> usize {
        self.next.get()
    }

    pub fn next_result(&self) -> usize {
        self.next_result.get()
    }

    pub fn tag_results(&self) -> usize {
        self.tag_results.get()
    }

    pub fn reset(&self) -> usize {
        self.reset.get()
    }

    pub fn close(&self) -> usize {
        self.close.get()
    }

    pub fn optimize(&self) -> usize {
        self.optimize.get()
    }
}

pub struct ProbeIterator {
    base: IteratorBase,
    inner: BoxedIterator,
    results_per_match: usize,
    remaining: usize,
    replacement: Option<BoxedIterator>,
    calls: Rc<ProbeCalls>,
}

impl ProbeIterator {
    pub fn new(inner: BoxedIterator) -> Self {
        Self {
            base: IteratorBase::new(),
            inner,
            results_per_match: 1,
            remaining: 0,
            replacement: None,
            calls: Rc::new(ProbeCalls::default()),
        }
    }

    /// Number of binding sets offered for every matching value (at least 1).
    pub fn with_results_per_match(mut self, results: usize) -> Self {
        self.results_per_match = results.max(1);
        self
    }

    /// The next `optimize` call hands out `replacement`.
    pub fn optimizing_to(mut self, replacement: BoxedIterator) -> Self {
        self.replacement = Some(replacement);
        self
    }

    pub fn calls(&self) -> Rc<ProbeCalls> {
        Rc::clone(&self.calls)
    }

    /// Binding sets left for the current value.
    pub fn remaining_results(&self) -> usize {
        self.remaining
    }

    fn start_value(&mut self, value: &Value) {
        self.remaining = self.results_per_match - 1;
        self.base.set_last(value.clone());
    }
}

impl QueryIterator for ProbeIterator {
    fn base(&self) -> &IteratorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut IteratorBase {
        &mut self.base
    }

    fn reset(&mut self) {
        bump(&self.calls.reset);
        self.inner.reset();
        self.remaining = 0;
        self.base.clear_last();
    }

    fn close(&mut self) {
        bump(&self.calls.close);
        self.inner.close();
    }

    fn clone_iter(&self) -> BoxedIterator {
        let mut out = ProbeIterator::new(self.inner.clone_iter()).with_results_per_match(self.results_per_match);
        out.replacement = self.replacement.as_ref().map(|r| r.clone_iter());
        out.base.copy_tags_from(&self.base);
        Box::new(out)
    }

    fn next(&mut self) -> Option<Value> {
        bump(&self.calls.next);
        let value = self.inner.next();
        match &value {
            Some(v) => self.start_value(v),
            None => self.remaining = 0,
        }
        value
    }

    fn next_result(&mut self) -> bool {
        bump(&self.calls.next_result);
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn check(&mut self, value: &Value) -> bool {
        bump(&self.calls.check);
        let matched = self.inner.check(value);
        if matched {
            self.start_value(value);
        } else {
            self.remaining = 0;
            self.base.set_last(value.clone());
        }
        matched
    }

    fn tag_results(&self, out: &mut Bindings) {
        bump(&self.calls.tag_results);
        self.base.tag_results(out);
        self.inner.tag_results(out);
    }

    fn iterator_type(&self) -> IteratorType {
        PROBE_TYPE
    }

    fn debug_string(&self, width: usize) -> String {
        format!(
            "{}({} #{} tags:{}\n{})",
            indent(width),
            self.iterator_type(),
            self.uid(),
            self.base.tags(),
            self.inner.debug_string(width + 4)
        )
    }

    fn optimize(&mut self) -> Option<BoxedIterator> {
        bump(&self.calls.optimize);
        self.replacement.take()
    }

    fn stats(&self) -> IteratorStats {
        self.inner.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::FixedIterator;

    #[test]
    fn probe_offers_scripted_binding_sets() {
        let mut probe = ProbeIterator::new(Box::new(FixedIterator::from_values([1u64]))).with_results_per_match(3);
        assert!(probe.check(&Value::from(1u64)));
        assert!(probe.next_result());
        assert!(probe.next_result());
        assert!(!probe.next_result());
        assert_eq!(probe.calls().next_result(), 3);
    }

    #[test]
    fn probe_clone_has_fresh_counters() {
        let mut probe = ProbeIterator::new(Box::new(FixedIterator::from_values([1u64])));
        probe.check(&Value::from(1u64));
        let mut copy = probe.clone_iter();
        copy.check(&Value::from(1u64));
        copy.check(&Value::from(2u64));
        assert_eq!(probe.calls().check(), 1);
    }
}
