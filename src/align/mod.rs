// Sequence alignment (Myers O(ND), linear space).
//
// - `myers`: the divide-and-conquer engine over a shared frontier arena
//
// This module owns the public surface: `ResultVectors`, the per-call
// `Aligner`, and the `align` / `align_by` shorthands.

mod myers;

use crate::error::{DiffError, Result, Side};

use myers::Myers;

// ---------------------------------------------------------------------------
// Result vectors
// ---------------------------------------------------------------------------

/// Per-element change markers produced by an alignment.
///
/// `source[i]` is true when source element `i` is deleted, `target[j]` is
/// true when target element `j` is inserted. Each vector carries one extra
/// sentinel slot past the end, which is never marked. Unmarked positions form
/// a longest common subsequence under the predicate used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultVectors {
    pub source: Vec<bool>,
    pub target: Vec<bool>,
}

impl ResultVectors {
    /// Unmarked vectors for sequences of the given lengths.
    pub fn new(source_len: usize, target_len: usize) -> Self {
        Self {
            source: vec![false; source_len + 1],
            target: vec![false; target_len + 1],
        }
    }

    /// Number of deleted source elements.
    pub fn deletions(&self) -> usize {
        self.source.iter().filter(|&&m| m).count()
    }

    /// Number of inserted target elements.
    pub fn insertions(&self) -> usize {
        self.target.iter().filter(|&&m| m).count()
    }

    /// Edit distance: deletions plus insertions.
    pub fn distance(&self) -> usize {
        self.deletions() + self.insertions()
    }

    /// True when nothing is marked on either side.
    pub fn is_unchanged(&self) -> bool {
        !self.source.iter().chain(&self.target).any(|&m| m)
    }
}

// ---------------------------------------------------------------------------
// Aligner
// ---------------------------------------------------------------------------

/// A single alignment request.
///
/// Each instance owns its working storage; independent instances may run on
/// separate threads while sharing read-only input sequences.
///
/// ```
/// use oxidiff::align::Aligner;
///
/// let x = ["a", "b", "c"];
/// let y = ["a", "x", "c"];
/// let rv = Aligner::new(&x, &y, |a: &&str, b: &&str| a == b).run();
/// assert_eq!(rv.source, [false, true, false, false]);
/// assert_eq!(rv.target, [false, true, false, false]);
/// ```
pub struct Aligner<'a, T, F> {
    x: &'a [T],
    y: &'a [T],
    eq: F,
    xidx: Option<&'a [usize]>,
    yidx: Option<&'a [usize]>,
}

impl<'a, T, F> Aligner<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    pub fn new(x: &'a [T], y: &'a [T], eq: F) -> Self {
        Self {
            x,
            y,
            eq,
            xidx: None,
            yidx: None,
        }
    }

    /// Attach index maps translating local positions to result-vector
    /// positions. `None` keeps the identity map for that side.
    ///
    /// Each map must have exactly one entry per element of its sequence, and
    /// no entry may be so large that its result vector could not be sized.
    pub fn with_index_maps(
        mut self,
        xidx: Option<&'a [usize]>,
        yidx: Option<&'a [usize]>,
    ) -> Result<Self> {
        check_map(Side::Source, xidx, self.x.len())?;
        check_map(Side::Target, yidx, self.y.len())?;
        self.xidx = xidx;
        self.yidx = yidx;
        Ok(self)
    }

    /// Run the alignment into freshly allocated result vectors.
    ///
    /// Vectors are sized to hold every mapped position plus the sentinel.
    pub fn run(self) -> ResultVectors {
        let mut rv = ResultVectors {
            source: vec![false; mapped_extent(self.xidx, self.x.len()) + 1],
            target: vec![false; mapped_extent(self.yidx, self.y.len()) + 1],
        };
        self.mark(&mut rv);
        rv
    }

    /// Run the alignment into caller-owned result vectors.
    ///
    /// Existing marks are kept, so several sub-range alignments can land in
    /// one pair of vectors. Fails if a mapped position would reach the
    /// sentinel slot or beyond.
    pub fn run_into(self, rv: &mut ResultVectors) -> Result<()> {
        check_fits(Side::Source, self.xidx, self.x.len(), rv.source.len())?;
        check_fits(Side::Target, self.yidx, self.y.len(), rv.target.len())?;
        self.mark(rv);
        Ok(())
    }

    fn mark(self, rv: &mut ResultVectors) {
        let mut engine = Myers::new(
            self.x,
            self.y,
            self.eq,
            self.xidx,
            self.yidx,
            &mut rv.source,
            &mut rv.target,
        );
        engine.run();
    }
}

fn check_map(side: Side, map: Option<&[usize]>, expected: usize) -> Result<()> {
    let Some(map) = map else {
        return Ok(());
    };
    if map.len() != expected {
        return Err(DiffError::IndexMapLength {
            side,
            expected,
            actual: map.len(),
        });
    }
    // The index slot and the sentinel after it must both be addressable.
    match map.iter().copied().max() {
        Some(index) if index.checked_add(2).is_none() => Err(DiffError::IndexOutOfRange {
            side,
            index,
            len: usize::MAX,
        }),
        _ => Ok(()),
    }
}

/// Number of non-sentinel slots a result vector needs. Maps must have passed
/// `check_map`.
fn mapped_extent(map: Option<&[usize]>, len: usize) -> usize {
    map.and_then(|m| m.iter().max())
        .map_or(len, |&max| len.max(max + 1))
}

fn check_fits(side: Side, map: Option<&[usize]>, len: usize, rv_len: usize) -> Result<()> {
    let slots = rv_len.saturating_sub(1);
    let overflow = match map {
        Some(m) => m.iter().copied().max().filter(|&max| max >= slots),
        None => len.checked_sub(1).filter(|_| len > slots),
    };
    match overflow {
        Some(index) => Err(DiffError::IndexOutOfRange {
            side,
            index,
            len: rv_len,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Shorthands
// ---------------------------------------------------------------------------

/// Align two sequences under `PartialEq`.
pub fn align<T: PartialEq>(x: &[T], y: &[T]) -> ResultVectors {
    Aligner::new(x, y, T::eq).run()
}

/// Align two sequences under a caller-supplied equality predicate.
///
/// The predicate should be an equivalence relation; if it is not, the
/// resulting script still replays both inputs but may not be minimal.
pub fn align_by<T, F>(x: &[T], y: &[T], eq: F) -> ResultVectors
where
    F: FnMut(&T, &T) -> bool,
{
    Aligner::new(x, y, eq).run()
}
