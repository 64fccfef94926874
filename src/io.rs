// File-level diff helpers.
//
// Provides `diff_files()`, which reads two files fully, diffs them as bytes
// or as UTF-8 lines, and reports per-hunk summaries. Used by the CLI.

use std::path::Path;

use crate::engine::{self, Diff, DiffOptions};
use crate::error::{DiffError, Result};
use crate::hunk::Hunk;

// ---------------------------------------------------------------------------
// Mode and stats
// ---------------------------------------------------------------------------

/// How file contents are split into elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// One element per byte.
    Bytes,
    /// One element per line, terminator included. Both files must be UTF-8.
    Lines,
}

/// Bounds and change counts of one hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkSummary {
    pub pos_x: usize,
    pub end_x: usize,
    pub pos_y: usize,
    pub end_y: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl<T> From<&Hunk<'_, T>> for HunkSummary {
    fn from(h: &Hunk<'_, T>) -> Self {
        let counts = h.counts();
        Self {
            pos_x: h.pos_x,
            end_x: h.end_x,
            pos_y: h.pos_y,
            end_y: h.end_y,
            deletions: counts.deletions,
            insertions: counts.insertions,
        }
    }
}

/// Statistics returned by `diff_files()`.
#[derive(Debug, Clone)]
pub struct DiffStats {
    /// Source file size in bytes.
    pub source_size: u64,
    /// Target file size in bytes.
    pub target_size: u64,
    /// Elements compared on each side (bytes or lines).
    pub source_elements: usize,
    pub target_elements: usize,
    pub matches: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub hunks: Vec<HunkSummary>,
}

impl DiffStats {
    fn collect<T>(diff: &Diff<T>, source_size: u64, target_size: u64) -> Self {
        let counts = diff.counts();
        Self {
            source_size,
            target_size,
            source_elements: counts.source_len(),
            target_elements: counts.target_len(),
            matches: counts.matches,
            deletions: counts.deletions,
            insertions: counts.insertions,
            hunks: diff.hunks().iter().map(HunkSummary::from).collect(),
        }
    }

    /// True when the files compared equal element for element.
    pub fn is_identical(&self) -> bool {
        self.deletions == 0 && self.insertions == 0
    }
}

// ---------------------------------------------------------------------------
// diff_files
// ---------------------------------------------------------------------------

/// Diff a source file against a target file.
///
/// Both files are read fully into memory. `source_offset` skips that many
/// leading source bytes in byte mode and must be zero in line mode.
pub fn diff_files(
    source_path: &Path,
    target_path: &Path,
    mode: DiffMode,
    source_offset: usize,
    opts: &DiffOptions,
) -> Result<DiffStats> {
    let source = std::fs::read(source_path)?;
    let target = std::fs::read(target_path)?;
    let (source_size, target_size) = (source.len() as u64, target.len() as u64);

    let stats = match mode {
        DiffMode::Bytes => {
            let diff = engine::diff_bytes_at(&source, &target, source_offset, opts)?;
            DiffStats::collect(&diff, source_size, target_size)
        }
        DiffMode::Lines => {
            if source_offset != 0 {
                return Err(DiffError::OffsetNotSupported { offset: source_offset });
            }
            let old = utf8(&source, source_path)?;
            let new = utf8(&target, target_path)?;
            let diff = engine::diff_lines(old, new, opts)?;
            DiffStats::collect(&diff, source_size, target_size)
        }
    };

    log::debug!(
        "diff_files: {} vs {}: {} deleted, {} inserted, {} hunks",
        source_path.display(),
        target_path.display(),
        stats.deletions,
        stats.insertions,
        stats.hunks.len()
    );
    Ok(stats)
}

fn utf8<'a>(data: &'a [u8], path: &Path) -> Result<&'a str> {
    std::str::from_utf8(data).map_err(|_| DiffError::InvalidUtf8(path.display().to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
