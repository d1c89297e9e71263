//! The iterator contract shared by every node of a query tree.
//!
//! A query is a tree of iterators. Each node can be driven in two modes:
//!
//! - enumeration (`next`): produce every value the node can offer;
//! - lookup (`check`): test one candidate value against the node's constraint.
//!
//! After a successful `check` on the root, the driver walks every binding set
//! for that candidate with `tag_results` / `next_result`.

use crate::stats::IteratorStats;
use crate::tags::{Bindings, FixedTags, Tag, TagSet, intern_tag};
use crate::value::Value;
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub type BoxedIterator = Box<dyn QueryIterator>;

/// Stable identifier of an iterator variant, used in rendering, logging and
/// optimizer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IteratorType {
    All,
    Fixed,
    Null,
    Optional,
    /// Iterator defined outside this crate.
    Custom(&'static str),
}

impl IteratorType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IteratorType::All => "all",
            IteratorType::Fixed => "fixed",
            IteratorType::Null => "null",
            IteratorType::Optional => "optional",
            IteratorType::Custom(name) => *name,
        }
    }
}

impl fmt::Display for IteratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

fn next_uid() -> u64 {
    NEXT_UID.fetch_add(1, Ordering::Relaxed)
}

/// Bookkeeping every iterator carries: its tags, the last value it produced or
/// checked, and whether it can be nexted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IteratorBase {
    uid: u64,
    tags: TagSet,
    fixed_tags: FixedTags,
    last: Option<Value>,
    nextable: bool,
}

impl IteratorBase {
    pub fn new() -> Self {
        Self { uid: next_uid(), tags: TagSet::new(), fixed_tags: FixedTags::default(), last: None, nextable: true }
    }

    pub fn unnextable() -> Self {
        Self { nextable: false, ..Self::new() }
    }

    /// Fresh base (new uid, no last value) carrying a copy of `self`'s tags.
    pub fn cloned_tags(&self) -> Self {
        let mut base = Self { nextable: self.nextable, ..Self::new() };
        base.copy_tags_from(self);
        base
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn nextable(&self) -> bool {
        self.nextable
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn fixed_tags(&self) -> &FixedTags {
        &self.fixed_tags
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.insert(tag);
    }

    pub fn add_fixed_tag(&mut self, tag: Tag, value: Value) {
        self.fixed_tags.insert(tag, value);
    }

    pub fn copy_tags_from(&mut self, other: &IteratorBase) {
        for tag in other.tags.iter() {
            self.tags.insert(tag.clone());
        }
        for (tag, value) in other.fixed_tags.iter() {
            self.fixed_tags.insert(tag.clone(), value.clone());
        }
    }

    pub fn last(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    pub fn set_last(&mut self, value: Value) {
        self.last = Some(value);
    }

    pub fn clear_last(&mut self) {
        self.last = None;
    }

    /// Binds every tag to the last value and every fixed tag to its constant.
    pub fn tag_results(&self, out: &mut Bindings) {
        if let Some(last) = &self.last {
            for tag in self.tags.iter() {
                out.insert(tag.clone(), last.clone());
            }
        }
        for (tag, value) in self.fixed_tags.iter() {
            out.insert(tag.clone(), value.clone());
        }
    }
}

impl Default for IteratorBase {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of a query tree.
///
/// Trees are single-threaded: one caller drives a tree at a time, and a node
/// exclusively owns its children.
pub trait QueryIterator {
    fn base(&self) -> &IteratorBase;

    fn base_mut(&mut self) -> &mut IteratorBase;

    /// Returns to the pre-enumeration state, recursively.
    fn reset(&mut self);

    /// Releases owned resources, recursively. Calling it twice is harmless.
    fn close(&mut self);

    /// Deep copy with the same tags and reset check state.
    fn clone_iter(&self) -> BoxedIterator;

    /// Enumeration step; `None` once exhausted.
    fn next(&mut self) -> Option<Value>;

    /// Advances to the next binding set for the current value.
    fn next_result(&mut self) -> bool {
        false
    }

    /// Lookup mode: does `value` satisfy this subtree?
    fn check(&mut self, value: &Value) -> bool;

    /// Writes this node's bindings for the current result into `out`.
    fn tag_results(&self, out: &mut Bindings) {
        self.base().tag_results(out);
    }

    fn iterator_type(&self) -> IteratorType;

    fn debug_string(&self, indent: usize) -> String;

    /// Rewrites this subtree into a cheaper equivalent.
    ///
    /// `None` means unchanged. `Some(replacement)` hands the replacement to
    /// the caller, which closes `self` and substitutes it.
    fn optimize(&mut self) -> Option<BoxedIterator>;

    fn stats(&self) -> IteratorStats;

    fn uid(&self) -> u64 {
        self.base().uid()
    }

    fn nextable(&self) -> bool {
        self.base().nextable()
    }

    fn tags(&self) -> &TagSet {
        self.base().tags()
    }

    fn fixed_tags(&self) -> &FixedTags {
        self.base().fixed_tags()
    }

    fn add_tag(&mut self, tag: &str) {
        self.base_mut().add_tag(intern_tag(tag));
    }

    fn add_fixed_tag(&mut self, tag: &str, value: Value) {
        self.base_mut().add_fixed_tag(intern_tag(tag), value);
    }

    fn last(&self) -> Option<&Value> {
        self.base().last()
    }

    fn size(&self) -> u64 {
        self.stats().size
    }
}

/// Drives an iterator in enumeration mode as a std iterator.
pub fn values(it: &mut dyn QueryIterator) -> Values<'_> {
    Values { it }
}

pub struct Values<'a> {
    it: &'a mut dyn QueryIterator,
}

impl Iterator for Values<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.it.next()
    }
}

pub(crate) fn indent(width: usize) -> String {
    " ".repeat(width)
}

pub(crate) fn check_log_in(it: &dyn QueryIterator, value: &Value) {
    tracing::trace!(iterator = %it.iterator_type(), uid = it.uid(), %value, "check");
}

pub(crate) fn check_log_out(it: &dyn QueryIterator, value: &Value, matched: bool) -> bool {
    tracing::trace!(iterator = %it.iterator_type(), uid = it.uid(), %value, matched, "check done");
    matched
}

pub(crate) fn next_log_out(it: &dyn QueryIterator, value: Option<Value>) -> Option<Value> {
    match &value {
        Some(v) => tracing::trace!(iterator = %it.iterator_type(), uid = it.uid(), value = %v, "next"),
        None => tracing::trace!(iterator = %it.iterator_type(), uid = it.uid(), "next exhausted"),
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_assigns_distinct_uids() {
        assert_ne!(IteratorBase::new().uid(), IteratorBase::new().uid());
    }

    #[test]
    fn base_tags_nothing_before_a_value_is_seen_except_fixed_tags() {
        let mut base = IteratorBase::new();
        base.add_tag(intern_tag("x"));
        base.add_fixed_tag(intern_tag("kind"), Value::from("person"));

        let mut out = Bindings::new();
        base.tag_results(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(&intern_tag("kind")), Some(&Value::from("person")));

        base.set_last(Value::from(9u64));
        base.tag_results(&mut out);
        assert_eq!(out.get(&intern_tag("x")), Some(&Value::from(9u64)));
    }

    #[test]
    fn cloned_tags_copies_tags_but_not_state() {
        let mut base = IteratorBase::unnextable();
        base.add_tag(intern_tag("x"));
        base.add_fixed_tag(intern_tag("p"), Value::from(1u64));
        base.set_last(Value::from(2u64));

        let copy = base.cloned_tags();
        assert_ne!(copy.uid(), base.uid());
        assert!(!copy.nextable());
        assert_eq!(copy.tags(), base.tags());
        assert_eq!(copy.fixed_tags(), base.fixed_tags());
        assert_eq!(copy.last(), None);
    }

    #[test]
    fn custom_iterator_type_renders_its_name() {
        assert_eq!(IteratorType::Custom("hasa").to_string(), "hasa");
        assert_eq!(IteratorType::Optional.as_str(), "optional");
    }
}
