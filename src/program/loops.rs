//! Loop index: matching `[` and `]` positions
//!
//! The index is built once per program by a single left-to-right scan with an
//! explicit stack of pending `[` positions. Both directions are stored so the
//! dispatcher can jump forward or backward in constant time.

use crate::interpreter::errors::EngineError;
use rustc_hash::FxHashMap;

/// Immutable bijection between loop-begin and loop-end positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopIndex {
    begin_to_end: FxHashMap<usize, usize>,
    end_to_begin: FxHashMap<usize, usize>,
}

impl LoopIndex {
    /// Validate bracket structure and record every matched pair
    ///
    /// Fails with `UnmatchedLoopEnd` at the first `]` that pops an empty stack, or
    /// with `UnclosedLoop` at the earliest `[` still pending after the scan.
    pub fn build(source: &[char]) -> Result<Self, EngineError> {
        let mut pending: Vec<usize> = Vec::new();
        let mut index = LoopIndex::default();

        for (position, &c) in source.iter().enumerate() {
            match c {
                '[' => pending.push(position),
                ']' => {
                    let begin = pending
                        .pop()
                        .ok_or(EngineError::UnmatchedLoopEnd { position })?;
                    index.begin_to_end.insert(begin, position);
                    index.end_to_begin.insert(position, begin);
                }
                _ => {}
            }
        }

        // Bottom of the stack is the outermost, earliest unmatched `[`
        if let Some(&position) = pending.first() {
            return Err(EngineError::UnclosedLoop { position });
        }

        Ok(index)
    }

    /// Matching `]` for the `[` at `begin`
    pub fn end_of(&self, begin: usize) -> Option<usize> {
        self.begin_to_end.get(&begin).copied()
    }

    /// Matching `[` for the `]` at `end`
    pub fn begin_of(&self, end: usize) -> Option<usize> {
        self.end_to_begin.get(&end).copied()
    }

    /// Number of loops in the program
    pub fn len(&self) -> usize {
        self.begin_to_end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.begin_to_end.is_empty()
    }

    /// All `(begin, end)` pairs, ordered by begin position
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> =
            self.begin_to_end.iter().map(|(&b, &e)| (b, e)).collect();
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(source: &str) -> Vec<char> {
        source.chars().collect()
    }

    #[test]
    fn test_nested_loops() {
        let index = LoopIndex::build(&chars("+[>[-]<]")).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.end_of(1), Some(7));
        assert_eq!(index.end_of(3), Some(5));
        assert_eq!(index.begin_of(7), Some(1));
        assert_eq!(index.begin_of(5), Some(3));
        assert_eq!(index.pairs(), vec![(1, 7), (3, 5)]);
    }

    #[test]
    fn test_inert_characters_keep_positions() {
        let index = LoopIndex::build(&chars("ab[ c ]")).unwrap();
        assert_eq!(index.end_of(2), Some(6));
    }

    #[test]
    fn test_no_loops() {
        let index = LoopIndex::build(&chars("+++.")).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.end_of(0), None);
    }

    #[test]
    fn test_unmatched_loop_end() {
        let err = LoopIndex::build(&chars("+[]]")).unwrap_err();
        assert_eq!(err, EngineError::UnmatchedLoopEnd { position: 3 });
    }

    #[test]
    fn test_unclosed_loop_reports_earliest() {
        let err = LoopIndex::build(&chars("[[]+[")).unwrap_err();
        assert_eq!(err, EngineError::UnclosedLoop { position: 0 });
    }

    #[test]
    fn test_unmatched_end_wins_over_open_loop() {
        // The scan stops at the first bad `]` even if a `[` would stay open later
        let err = LoopIndex::build(&chars("][")).unwrap_err();
        assert_eq!(err, EngineError::UnmatchedLoopEnd { position: 0 });
    }

    /// Generate a bracket-balanced program over `[]+.`
    fn balanced_program() -> impl Strategy<Value = String> {
        prop::collection::vec(0u8..4, 0..64).prop_map(|ops| {
            let mut depth = 0usize;
            let mut out = String::new();
            for op in ops {
                match op {
                    0 => {
                        depth += 1;
                        out.push('[');
                    }
                    1 if depth > 0 => {
                        depth -= 1;
                        out.push(']');
                    }
                    2 => out.push('.'),
                    _ => out.push('+'),
                }
            }
            out.extend(std::iter::repeat(']').take(depth));
            out
        })
    }

    proptest! {
        /// Every bracket appears in exactly one pair and the two maps invert each other
        #[test]
        fn prop_balanced_index_is_involution(source in balanced_program()) {
            let source = chars(&source);
            let index = LoopIndex::build(&source).unwrap();

            let brackets = source.iter().filter(|c| **c == '[' || **c == ']').count();
            prop_assert_eq!(index.len() * 2, brackets);

            for (begin, end) in index.pairs() {
                prop_assert!(begin < end);
                prop_assert_eq!(source[begin], '[');
                prop_assert_eq!(source[end], ']');
                prop_assert_eq!(index.begin_of(end), Some(begin));
            }
        }

        /// Malformed programs fail at the right position, balanced ones succeed
        #[test]
        fn prop_validation_reports_offender(source in "[\\[\\]+]{1,40}") {
            let source = chars(&source);
            let mut depth = 0i64;
            let mut went_negative = None;
            for (i, c) in source.iter().enumerate() {
                match c {
                    '[' => depth += 1,
                    ']' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    went_negative = Some(i);
                    break;
                }
            }

            match LoopIndex::build(&source) {
                Ok(_) => prop_assert!(went_negative.is_none() && depth == 0),
                Err(EngineError::UnmatchedLoopEnd { position }) => {
                    prop_assert_eq!(Some(position), went_negative);
                }
                Err(EngineError::UnclosedLoop { position }) => {
                    prop_assert!(went_negative.is_none());
                    prop_assert_eq!(source[position], '[');
                    // Everything before the offender is balanced
                    let prefix = &source[..position];
                    let opens = prefix.iter().filter(|c| **c == '[').count();
                    let closes = prefix.iter().filter(|c| **c == ']').count();
                    prop_assert_eq!(opens, closes);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
