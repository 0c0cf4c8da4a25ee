//! Shared heap storage for runtime values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted storage behind heap values.
///
/// Only `Value` factory methods construct it, so every string value is
/// created through one path.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(super) fn from_arc(inner: Arc<T>) -> Self {
        Heap(inner)
    }

    /// True when both handles share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deref_and_share() {
        let first: Heap<str> = Heap::from_arc(Arc::from("text"));
        let second = first.clone();
        assert_eq!(&*first, "text");
        assert!(first.ptr_eq(&second));
        let third: Heap<str> = Heap::from_arc(Arc::from("text"));
        assert_eq!(first, third);
        assert!(!first.ptr_eq(&third));
    }
}
