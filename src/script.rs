// Edit scripts: the result vectors of an alignment turned into an ordered
// stream of Match / Delete / Insert operations.

use std::iter::FusedIterator;

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit<T> {
    /// Element present, unchanged, in both sequences.
    Match(T),
    /// Element present only in the source.
    Delete(T),
    /// Element present only in the target.
    Insert(T),
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Match(v) | Self::Delete(v) | Self::Insert(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Match(v) | Self::Delete(v) | Self::Insert(v) => v,
        }
    }

    /// True for `Delete` and `Insert`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Match(_))
    }

    /// True when replaying this edit consumes a source element.
    pub fn advances_source(&self) -> bool {
        !matches!(self, Self::Insert(_))
    }

    /// True when replaying this edit consumes a target element.
    pub fn advances_target(&self) -> bool {
        !matches!(self, Self::Delete(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Edit<U> {
        match self {
            Self::Match(v) => Edit::Match(f(v)),
            Self::Delete(v) => Edit::Delete(f(v)),
            Self::Insert(v) => Edit::Insert(f(v)),
        }
    }
}

// ---------------------------------------------------------------------------
// Edit stream
// ---------------------------------------------------------------------------

/// Lazy edit stream over two sequences and their result vectors.
///
/// Yields at most `x.len() + y.len()` edits. Within a run of changes every
/// deletion comes before the insertions that follow it, so a replacement
/// reads as `Delete` then `Insert`.
pub struct Edits<'a, T> {
    x: &'a [T],
    y: &'a [T],
    rvx: &'a [bool],
    rvy: &'a [bool],
    s: usize,
    t: usize,
}

/// Walk `x` and `y` against their result vectors.
///
/// `rvx[i]` marks `x[i]` deleted and `rvy[j]` marks `y[j]` inserted. Missing
/// entries (vectors shorter than their sequence) read as unmarked.
pub fn edits<'a, T>(x: &'a [T], y: &'a [T], rvx: &'a [bool], rvy: &'a [bool]) -> Edits<'a, T> {
    Edits {
        x,
        y,
        rvx,
        rvy,
        s: 0,
        t: 0,
    }
}

impl<'a, T> Edits<'a, T> {
    fn source_marked(&self) -> bool {
        self.s < self.x.len() && self.rvx.get(self.s).copied().unwrap_or(false)
    }

    fn target_marked(&self) -> bool {
        self.t < self.y.len() && self.rvy.get(self.t).copied().unwrap_or(false)
    }

    fn delete(&mut self) -> Edit<&'a T> {
        let v = &self.x[self.s];
        self.s += 1;
        Edit::Delete(v)
    }

    fn insert(&mut self) -> Edit<&'a T> {
        let v = &self.y[self.t];
        self.t += 1;
        Edit::Insert(v)
    }
}

impl<'a, T> Iterator for Edits<'a, T> {
    type Item = Edit<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let in_x = self.s < self.x.len();
        let in_y = self.t < self.y.len();
        if !in_x && !in_y {
            return None;
        }

        if in_x && in_y && !self.source_marked() && !self.target_marked() {
            let v = &self.x[self.s];
            self.s += 1;
            self.t += 1;
            return Some(Edit::Match(v));
        }
        if self.source_marked() {
            return Some(self.delete());
        }
        if self.target_marked() {
            return Some(self.insert());
        }

        // Unmarked element facing an exhausted side: the vectors do not
        // describe these sequences. Drain what is left.
        log::warn!(
            "edit script: result vectors disagree with inputs at source {}, target {}",
            self.s,
            self.t
        );
        Some(if in_x { self.delete() } else { self.insert() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest_x = self.x.len() - self.s;
        let rest_y = self.y.len() - self.t;
        (rest_x.max(rest_y), Some(rest_x + rest_y))
    }
}

impl<T> FusedIterator for Edits<'_, T> {}

/// Collect the edit script for `x` and `y` given their result vectors.
pub fn build_edit_script<T: Clone>(x: &[T], y: &[T], rvx: &[bool], rvy: &[bool]) -> Vec<Edit<T>> {
    edits(x, y, rvx, rvy).map(|e| e.map(T::clone)).collect()
}

// ---------------------------------------------------------------------------
// Replay and tallies
// ---------------------------------------------------------------------------

/// The source sequence as replayed from `Match` and `Delete` edits.
pub fn old_side<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits
        .iter()
        .filter(|e| e.advances_source())
        .map(|e| e.value().clone())
        .collect()
}

/// The target sequence as replayed from `Match` and `Insert` edits.
pub fn new_side<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits
        .iter()
        .filter(|e| e.advances_target())
        .map(|e| e.value().clone())
        .collect()
}

/// Per-kind edit counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditCounts {
    pub matches: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl EditCounts {
    pub fn of<T>(edits: &[Edit<T>]) -> Self {
        edits.iter().fold(Self::default(), |mut c, e| {
            match e {
                Edit::Match(_) => c.matches += 1,
                Edit::Delete(_) => c.deletions += 1,
                Edit::Insert(_) => c.insertions += 1,
            }
            c
        })
    }

    /// Deletions plus insertions.
    pub fn changes(&self) -> usize {
        self.deletions + self.insertions
    }

    /// Source elements covered.
    pub fn source_len(&self) -> usize {
        self.matches + self.deletions
    }

    /// Target elements covered.
    pub fn target_len(&self) -> usize {
        self.matches + self.insertions
    }
}
