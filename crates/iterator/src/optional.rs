//! The optional iterator: the `?` of the iterator algebra.
//!
//! An optional node wraps a sub-constraint that must not restrict the query;
//! it only contributes the sub-constraint's bindings when they exist. It is
//! not an iterator in the strict sense. `check` always succeeds, and whether
//! the sub-iterator really matched is remembered for `next_result` and
//! `tag_results`.
//!
//! Optional nodes can only be checked. Nexting one is a tree construction
//! bug and is reported to the node's [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).

use crate::diagnostics::{SharedSink, UsageError, default_sink};
use crate::iterator::{
    BoxedIterator, IteratorBase, IteratorType, QueryIterator, check_log_in, check_log_out, indent,
};
use crate::stats::IteratorStats;
use crate::tags::Bindings;
use crate::value::Value;

pub struct OptionalIterator {
    base: IteratorBase,
    sub: BoxedIterator,
    last_check: bool,
    diagnostics: SharedSink,
}

impl OptionalIterator {
    /// Wraps `sub`, taking ownership of it.
    pub fn new(sub: BoxedIterator) -> Self {
        Self { base: IteratorBase::unnextable(), sub, last_check: false, diagnostics: default_sink() }
    }

    pub fn with_diagnostics(mut self, sink: SharedSink) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn sub_iterator(&self) -> &dyn QueryIterator {
        self.sub.as_ref()
    }

    /// Whether the sub-iterator matched the most recently checked value.
    pub fn last_check(&self) -> bool {
        self.last_check
    }
}

impl QueryIterator for OptionalIterator {
    fn base(&self) -> &IteratorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut IteratorBase {
        &mut self.base
    }

    fn reset(&mut self) {
        self.sub.reset();
        self.last_check = false;
        self.base.clear_last();
    }

    fn close(&mut self) {
        self.sub.close();
    }

    fn clone_iter(&self) -> BoxedIterator {
        let mut out = OptionalIterator::new(self.sub.clone_iter()).with_diagnostics(self.diagnostics.clone());
        out.base.copy_tags_from(&self.base);
        Box::new(out)
    }

    fn next(&mut self) -> Option<Value> {
        self.diagnostics.report(&UsageError::NotNextable { iterator: self.iterator_type(), uid: self.uid() });
        None
    }

    // There is another result only if the last check matched at all and the
    // sub-branch has one more.
    fn next_result(&mut self) -> bool {
        if self.last_check {
            return self.sub.next_result();
        }
        false
    }

    fn check(&mut self, value: &Value) -> bool {
        check_log_in(&*self, value);
        let matched = self.sub.check(value);
        self.last_check = matched;
        self.base.set_last(value.clone());
        check_log_out(&*self, value, matched);
        true
    }

    // A failed check means the sub-branch contributes nothing to the row.
    fn tag_results(&self, out: &mut Bindings) {
        if !self.last_check {
            return;
        }
        self.sub.tag_results(out);
    }

    fn iterator_type(&self) -> IteratorType {
        IteratorType::Optional
    }

    fn debug_string(&self, width: usize) -> String {
        format!(
            "{}({} tags:{}\n{})",
            indent(width),
            self.iterator_type(),
            self.base.tags(),
            self.sub.debug_string(width + 4)
        )
    }

    // Nothing to rewrite at this level; only the sub-iterator may be replaced.
    fn optimize(&mut self) -> Option<BoxedIterator> {
        if let Some(replacement) = self.sub.optimize() {
            tracing::debug!(
                uid = self.uid(),
                from = %self.sub.iterator_type(),
                to = %replacement.iterator_type(),
                "optional sub-iterator replaced"
            );
            self.sub.close();
            self.sub = replacement;
        }
        None
    }

    fn stats(&self) -> IteratorStats {
        let sub = self.sub.stats();
        IteratorStats::unnextable(sub.check_cost, sub.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::leaf::FixedIterator;

    fn fixed_ab() -> BoxedIterator {
        Box::new(FixedIterator::from_values(["a", "b"]).with_tag("x"))
    }

    #[test]
    fn starts_unchecked_and_unnextable() {
        let opt = OptionalIterator::new(fixed_ab());
        assert!(!opt.last_check());
        assert!(!opt.nextable());
        assert_eq!(opt.last(), None);
    }

    #[test]
    fn check_records_last_value_either_way() {
        let mut opt = OptionalIterator::new(fixed_ab());
        assert!(opt.check(&Value::from("zzz")));
        assert_eq!(opt.last(), Some(&Value::from("zzz")));
        assert!(!opt.last_check());
        assert!(opt.check(&Value::from("a")));
        assert!(opt.last_check());
    }

    #[test]
    fn next_reports_once_per_call() {
        let sink = RecordingSink::new();
        let mut opt = OptionalIterator::new(fixed_ab()).with_diagnostics(sink.clone());
        assert_eq!(opt.next(), None);
        assert_eq!(opt.next(), None);
        let reports = sink.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], UsageError::NotNextable { iterator: IteratorType::Optional, uid: opt.uid() });
    }

    #[test]
    fn debug_string_nests_sub_iterator() {
        let opt = OptionalIterator::new(fixed_ab()).with_tag("maybe");
        let rendered = opt.debug_string(2);
        let (head, tail) = rendered.split_once('\n').unwrap();
        assert_eq!(head, "  (optional tags:[maybe]");
        assert!(tail.starts_with("      (fixed"));
        assert!(tail.ends_with("))"));
    }
}
