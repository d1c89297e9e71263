//! Leaf iterators: nodes without children that produce values themselves.

mod all;
mod fixed;
mod null;

pub use all::AllIterator;
pub use fixed::FixedIterator;
pub use null::NullIterator;
