/// A type that collects the steps taken by an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when you don't
/// care which rewrite rules fired, which is the common case for plain
/// [`simplify`](crate::simplify::simplify) calls.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}
