//! Knobs for a single parse.

/// Options for [`parse_with`](crate::parse_with).
///
/// The defaults give plain backtracking semantics plus a left-recursion
/// guard. Neither memoization nor the guard changes the outcome for a grammar
/// in which every recursive cycle consumes input; they only bound the work
/// done, or turn a stack overflow into an ordinary failure. `max_depth` does
/// change outcomes, failing any match that nests too deeply, and memoized
/// results honour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Cache each rule reference's result per input position (packrat
    /// parsing). Trades memory for protection against exponential
    /// re-derivation in grammars with many overlapping alternatives.
    pub memoize: bool,

    /// Fail closed when named rules nest deeper than this.
    pub max_depth: Option<usize>,

    /// Fail closed when a rule reference re-enters itself at the same input
    /// position, which would otherwise recurse until the stack overflows.
    pub guard_left_recursion: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            memoize: false,
            max_depth: None,
            guard_left_recursion: true,
        }
    }
}

impl ParseOptions {
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_left_recursion_guard(mut self, guard: bool) -> Self {
        self.guard_left_recursion = guard;
        self
    }
}
