//! Node and edge types, and the structural-change mechanism that edits them.

use std::sync::Arc;

pub mod change;
pub mod conversion;
pub mod edge;
pub mod node;

pub use change::*;
pub use conversion::*;
pub use edge::*;
pub use node::*;

/// Anything addressed by a string identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

impl<T: Identified> Identified for Arc<T> {
    fn id(&self) -> &str {
        T::id(self)
    }
}

impl<T: Identified> Identified for &T {
    fn id(&self) -> &str {
        T::id(self)
    }
}
