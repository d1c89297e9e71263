//! Lazy iterator algebra for evaluating graph pattern queries.
//!
//! A query is a tree of [`QueryIterator`] nodes. The driver checks candidate
//! values against the root and, for every accepted value, enumerates the
//! binding sets with [`result_rows`]. [`OptionalIterator`] makes a subtree
//! non-rejecting while still binding its tags when it matches.

pub mod diagnostics;
pub mod iterator;
pub mod leaf;
pub mod optional;
pub mod results;
pub mod stats;
pub mod tags;
pub mod testkit;
pub mod value;

pub use diagnostics::{DiagnosticSink, RecordingSink, SharedSink, TracingSink, UsageError};
pub use iterator::{BoxedIterator, IteratorBase, IteratorType, QueryIterator, values};
pub use leaf::{AllIterator, FixedIterator, NullIterator};
pub use optional::OptionalIterator;
pub use results::result_rows;
pub use stats::{Cost, IteratorStats, UNNEXTABLE_COST};
pub use tags::{Bindings, Tag, TagSet, intern_tag};
pub use value::Value;
