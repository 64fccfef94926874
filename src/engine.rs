// Diff engine: ties alignment, edit scripts and hunks together.
//
// Provides the high-level entry points collaborators call:
//   - Generic sequences under `PartialEq` or a caller predicate
//   - Byte buffers, optionally starting at an offset into the source
//   - Text, split into lines that keep their terminators

use crate::align::{Aligner, ResultVectors};
use crate::error::{DiffError, Result};
use crate::hunk::{self, DEFAULT_CONTEXT, Hunk};
use crate::script::{self, Edit, EditCounts};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for a diff request.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Unchanged elements kept on each side of a change in a hunk.
    pub context: usize,
    /// Split hunks by locality instead of one hunk spanning every change.
    pub split_hunks: bool,
    /// Reject inputs whose combined length exceeds this many elements.
    /// Worst-case alignment time is quadratic, so untrusted inputs should be bounded.
    pub max_input_len: Option<usize>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
            split_hunks: true,
            max_input_len: None,
        }
    }
}

impl DiffOptions {
    fn check_len(&self, source_len: usize, target_len: usize) -> Result<()> {
        let total = source_len.saturating_add(target_len);
        match self.max_input_len {
            Some(limit) if total > limit => Err(DiffError::InputTooLarge { total, limit }),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Diff result
// ---------------------------------------------------------------------------

/// Outcome of one diff request: result vectors plus the edit script.
#[derive(Debug, Clone)]
pub struct Diff<T> {
    /// Change markers. For offset byte diffs the source vector covers the
    /// whole source buffer.
    pub vectors: ResultVectors,
    pub edits: Vec<Edit<T>>,
    /// Source position of the first edit.
    pub source_offset: usize,
    context: usize,
    split_hunks: bool,
}

impl<T> Diff<T> {
    fn new(
        vectors: ResultVectors,
        edits: Vec<Edit<T>>,
        source_offset: usize,
        opts: &DiffOptions,
    ) -> Self {
        Self {
            vectors,
            edits,
            source_offset,
            context: opts.context,
            split_hunks: opts.split_hunks,
        }
    }

    /// Hunks over the edit script. Source bounds include `source_offset`.
    pub fn hunks(&self) -> Vec<Hunk<'_, T>> {
        let mut hunks = if self.split_hunks {
            hunk::group_hunks(&self.edits, self.context)
        } else {
            hunk::assemble_hunks(&self.edits, self.context)
        };
        for h in &mut hunks {
            h.pos_x += self.source_offset;
            h.end_x += self.source_offset;
        }
        hunks
    }

    pub fn counts(&self) -> EditCounts {
        EditCounts::of(&self.edits)
    }

    /// True when the script contains no deletions or insertions.
    pub fn is_identical(&self) -> bool {
        !self.edits.iter().any(Edit::is_change)
    }
}

// ---------------------------------------------------------------------------
// Generic sequences
// ---------------------------------------------------------------------------

/// Diff two sequences under `PartialEq`.
pub fn diff<T: PartialEq + Clone>(x: &[T], y: &[T], opts: &DiffOptions) -> Result<Diff<T>> {
    diff_by(x, y, T::eq, opts)
}

/// Diff two sequences under a caller-supplied equality predicate.
pub fn diff_by<T, F>(x: &[T], y: &[T], eq: F, opts: &DiffOptions) -> Result<Diff<T>>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    opts.check_len(x.len(), y.len())?;
    let vectors = Aligner::new(x, y, eq).run();
    let edits = script::build_edit_script(x, y, &vectors.source, &vectors.target);
    Ok(Diff::new(vectors, edits, 0, opts))
}

// ---------------------------------------------------------------------------
// Bytes
// ---------------------------------------------------------------------------

/// Diff two byte buffers.
pub fn diff_bytes(source: &[u8], target: &[u8], opts: &DiffOptions) -> Result<Diff<u8>> {
    diff(source, target, opts)
}

/// Diff `source[source_offset..]` against `target`.
///
/// The source result vector spans the whole `source` buffer, so marked
/// positions and hunk bounds are absolute source offsets.
pub fn diff_bytes_at(
    source: &[u8],
    target: &[u8],
    source_offset: usize,
    opts: &DiffOptions,
) -> Result<Diff<u8>> {
    if source_offset > source.len() {
        return Err(DiffError::OffsetOutOfRange {
            offset: source_offset,
            len: source.len(),
        });
    }
    let window = &source[source_offset..];
    opts.check_len(window.len(), target.len())?;

    let xidx: Vec<usize> = (source_offset..source.len()).collect();
    let mut vectors = ResultVectors::new(source.len(), target.len());
    Aligner::new(window, target, |a: &u8, b: &u8| a == b)
        .with_index_maps(Some(xidx.as_slice()), None)?
        .run_into(&mut vectors)?;

    let edits = script::build_edit_script(
        window,
        target,
        &vectors.source[source_offset..],
        &vectors.target,
    );
    log::debug!(
        "diff_bytes_at: offset {source_offset}, window {}, target {}, distance {}",
        window.len(),
        target.len(),
        vectors.distance()
    );
    Ok(Diff::new(vectors, edits, source_offset, opts))
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Split `text` into lines, each keeping its trailing `\n`.
///
/// A final segment without a terminator is a line of its own; empty text has
/// no lines.
///
/// ```
/// assert_eq!(oxidiff::engine::split_lines("a\nb\r\nc"), ["a\n", "b\r\n", "c"]);
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Diff two texts line by line.
pub fn diff_lines<'a>(old: &'a str, new: &'a str, opts: &DiffOptions) -> Result<Diff<&'a str>> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    diff(&old_lines, &new_lines, opts)
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Diff many independent pairs on the rayon pool.
///
/// Each pair gets its own aligner and working storage; results come back in
/// input order.
#[cfg(feature = "parallel")]
pub fn diff_many<T>(pairs: &[(&[T], &[T])], opts: &DiffOptions) -> Vec<Result<Diff<T>>>
where
    T: PartialEq + Clone + Send + Sync,
{
    pairs.par_iter().map(|&(x, y)| diff(x, y, opts)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
