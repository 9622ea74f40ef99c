//! Unmasking matchers, built once per compiled program.
//!
//! The exact [`UnmaskMatcher`] strips literals from a well-formed masked
//! value in one anchored pass; the tolerant [`ExtractPipeline`] then walks
//! the token positions of its output one at a time, skipping garbage and
//! fill chars, and always terminates with a best-effort result. The exact
//! matcher fails on junk past the trailing literal run; the pipeline never
//! fails.

use crate::mask::alphabet::CharClass;

/// One capture stop per literal of the program, in pattern order. Each stop
/// captures the run of chars up to its literal and then consumes the literal
/// if present, so the user's typed content survives while separators drop out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnmaskMatcher {
    stops: Vec<char>,
    /// Last literal of the pattern; keys the trailing rule.
    tail: Option<char>,
}

impl UnmaskMatcher {
    pub(crate) fn new(stops: Vec<char>) -> Self {
        let tail = stops.last().copied();
        Self { stops, tail }
    }

    /// Anchored match over the whole input. Returns the joined captures, or
    /// `None` when leftover input defeats the trailing rule.
    pub(crate) fn apply(&self, input: &[char]) -> Option<String> {
        let mut out = String::new();
        let mut pos = 0usize;

        for stop in &self.stops {
            while pos < input.len() && input[pos] != *stop {
                out.push(input[pos]);
                pos += 1;
            }
            if pos < input.len() && input[pos] == *stop {
                pos += 1;
            }
        }

        match self.tail {
            Some(tail) => {
                while pos < input.len() && input[pos] != tail {
                    out.push(input[pos]);
                    pos += 1;
                }
                while pos < input.len() && input[pos] == tail {
                    pos += 1;
                }
                if pos < input.len() {
                    // Junk after the trailing literal run; hand off to the
                    // extraction pipeline.
                    return None;
                }
            }
            None => {
                out.extend(&input[pos..]);
            }
        }

        Some(out)
    }
}

/// One step per token of the program, in pattern order. A step skips an
/// optional run of the negated class, then captures at most one matching
/// char. The final step also captures any trailing negated non-fill run and
/// discards the fill run after it, so padded input cannot defeat extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExtractPipeline {
    steps: Vec<CharClass>,
    fill: char,
}

impl ExtractPipeline {
    pub(crate) fn new(steps: Vec<CharClass>, fill: char) -> Self {
        Self { steps, fill }
    }

    /// Best-effort extraction. Returns `None` only when the pattern has no
    /// token positions at all (nothing to extract).
    pub(crate) fn apply(&self, input: &[char]) -> Option<String> {
        if self.steps.is_empty() {
            return None;
        }

        let mut out = String::new();
        let mut pos = 0usize;
        let last = self.steps.len() - 1;

        for (idx, class) in self.steps.iter().enumerate() {
            while pos < input.len() && class.rejects(input[pos]) {
                pos += 1;
            }
            if pos < input.len() && class.accepts(input[pos]) {
                out.push(input[pos]);
                pos += 1;
            }
            if idx == last {
                // Fill chars stay out of the trailing capture so the
                // discard loop actually reaches them.
                while pos < input.len() && class.rejects(input[pos]) && input[pos] != self.fill {
                    out.push(input[pos]);
                    pos += 1;
                }
                while pos < input.len() && input[pos] == self.fill {
                    pos += 1;
                }
            }
        }

        Some(out)
    }
}
