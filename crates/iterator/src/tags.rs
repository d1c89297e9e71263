use crate::value::Value;
use core::fmt;
use smallvec::SmallVec;
use std::collections::HashMap;
use string_cache::DefaultAtom;

/// Interned tag name. Tag names repeat across every clone of a query tree, so
/// they go through the global `string_cache` interner.
pub type Tag = DefaultAtom;

/// One result row: tag name to bound value.
pub type Bindings = HashMap<Tag, Value>;

pub fn intern_tag(name: &str) -> Tag {
    DefaultAtom::from(name)
}

/// Insertion-ordered set of tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: SmallVec<[Tag; 4]>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag`, returning `false` if it was already present.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| &**t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(tag)?;
        }
        f.write_str("]")
    }
}

/// Tags bound to a constant instead of the node's last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTags {
    entries: SmallVec<[(Tag, Value); 2]>,
}

impl FixedTags {
    /// Binds `tag` to `value`, replacing an earlier binding of the same tag.
    pub fn insert(&mut self, tag: Tag, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            entry.1 = value;
        } else {
            self.entries.push((tag, value));
        }
    }

    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.entries.iter().find(|(t, _)| &**t == tag).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &Value)> {
        self.entries.iter().map(|(t, v)| (t, v))
    }
}
