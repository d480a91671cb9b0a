use std::ops::Range;

/// Underlined character ranges of a buffer.
///
/// Runs are kept sorted, non-overlapping and non-adjacent, so two
/// touching runs are always merged into one. Offsets are char indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnderlineRuns {
    runs: Vec<Range<usize>>,
}

impl UnderlineRuns {
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn runs(&self) -> &[Range<usize>] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Whether the character at `idx` is underlined.
    pub fn is_set(&self, idx: usize) -> bool {
        let next = self.runs.partition_point(|r| r.end <= idx);
        self.runs.get(next).is_some_and(|r| r.start <= idx)
    }

    /// Set or clear the underline attribute on every character in `range`.
    pub fn set(&mut self, range: Range<usize>, underline: bool) {
        if range.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.runs.len() + 2);
        for run in self.runs.drain(..) {
            if run.end <= range.start || run.start >= range.end {
                out.push(run);
                continue;
            }
            if run.start < range.start {
                out.push(run.start..range.start);
            }
            if run.end > range.end {
                out.push(range.end..run.end);
            }
        }
        if underline {
            out.push(range);
        }
        out.sort_by_key(|r| r.start);
        self.runs = merge_adjacent(out);
    }

    /// Shift runs for `len` characters inserted at `idx`.
    ///
    /// Inserted text takes the attribute of the character before it, so a
    /// run ending exactly at `idx` grows to cover the insertion.
    pub fn insert(&mut self, idx: usize, len: usize) {
        if len == 0 {
            return;
        }
        for run in &mut self.runs {
            if run.start >= idx {
                run.start += len;
                run.end += len;
            } else if run.end >= idx {
                run.end += len;
            }
        }
    }

    /// Drop the characters in `range` and shift later runs left.
    pub fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let len = range.end - range.start;
        let shift = |pos: usize| {
            if pos <= range.start {
                pos
            } else if pos >= range.end {
                pos - len
            } else {
                range.start
            }
        };
        let out = self
            .runs
            .drain(..)
            .map(|run| shift(run.start)..shift(run.end))
            .filter(|run| !run.is_empty())
            .collect();
        self.runs = merge_adjacent(out);
    }
}

fn merge_adjacent(runs: Vec<Range<usize>>) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = merged.last_mut()
            && run.start <= last.end
        {
            last.end = last.end.max(run.end);
        } else {
            merged.push(run);
        }
    }
    merged
}
