//! Per-invocation parsing state.

use std::collections::{HashMap, HashSet};

use crate::options::ParseOptions;
use crate::result::ParseResult;
use crate::trace::{Cut, TraceSink};

/// Identifies one rule applied at one input position.
///
/// Every input a parser sees is a suffix of the string handed to
/// [`parse`](super::parse), so the remaining length pins down the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RuleKey {
    rule: usize,
    position: usize,
}

impl RuleKey {
    pub(crate) fn new(rule: usize, input: &str) -> Self {
        Self {
            rule,
            position: input.len(),
        }
    }
}

/// A memoized result also depends on the nesting depth once
/// `ParseOptions::max_depth` is set, since a tag may fail closed at one depth
/// and match at another.
type MemoKey = (RuleKey, Option<usize>);

/// State for a single [`parse`](super::parse) call.
///
/// Holds the nesting depth, the options and trace sink, and the bookkeeping
/// behind memoization and the left-recursion guard. A session is created
/// fresh for every call and dropped when it returns.
pub struct Session<'s, 'i> {
    depth: usize,
    options: &'s ParseOptions,
    trace: &'s dyn TraceSink,
    memo: HashMap<MemoKey, ParseResult<'i>>,
    active: HashSet<RuleKey>,
    cuts: usize,
}

impl<'s, 'i> Session<'s, 'i> {
    pub fn new(options: &'s ParseOptions, trace: &'s dyn TraceSink) -> Self {
        Self {
            depth: 0,
            options,
            trace,
            memo: HashMap::new(),
            active: HashSet::new(),
            cuts: 0,
        }
    }

    /// Number of enclosing tags. Only matters for tracing and `max_depth`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &'s ParseOptions {
        self.options
    }

    pub fn trace(&self) -> &'s dyn TraceSink {
        self.trace
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Record that a guard failed closed at `input`.
    pub(crate) fn record_cut(&mut self, cut: Cut, input: &str) {
        self.cuts += 1;
        self.trace.cut(self.depth, cut, input);
    }

    /// How many times a guard has failed closed so far.
    pub(crate) fn cuts(&self) -> usize {
        self.cuts
    }

    fn memo_key(&self, key: RuleKey) -> MemoKey {
        (key, self.options.max_depth.map(|_| self.depth))
    }

    pub(crate) fn memoized(&self, key: RuleKey) -> Option<ParseResult<'i>> {
        if !self.options.memoize {
            return None;
        }
        self.memo.get(&self.memo_key(key)).cloned()
    }

    pub(crate) fn memoize(&mut self, key: RuleKey, result: &ParseResult<'i>) {
        if self.options.memoize {
            self.memo.insert(self.memo_key(key), result.clone());
        }
    }

    /// Mark `key` as in progress. Returns false if it already is, which
    /// means the rule re-entered itself without consuming input.
    pub(crate) fn enter_rule(&mut self, key: RuleKey) -> bool {
        !self.options.guard_left_recursion || self.active.insert(key)
    }

    pub(crate) fn leave_rule(&mut self, key: RuleKey) {
        if self.options.guard_left_recursion {
            self.active.remove(&key);
        }
    }
}
