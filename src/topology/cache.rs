//! Cache invalidation shared by structures that memoise derived topology.

/// Anything that caches a derived view of its connections (traversals,
/// root sets, …) should implement this.
pub trait InvalidateCache {
    /// Mark every derived view stale so the next query rebuilds it.
    fn invalidate_cache(&mut self);
}

impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}
