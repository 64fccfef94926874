// Hunk assembly: contiguous, context-padded slices of an edit stream with
// their source/target bounds.

use crate::script::{Edit, EditCounts};

/// Default number of unchanged elements kept on each side of a change.
pub const DEFAULT_CONTEXT: usize = 3;

/// A contiguous slice of an edit stream containing at least one change.
///
/// `pos_x`/`pos_y` are the source/target positions of the first edit,
/// `end_x`/`end_y` are one past the last source/target element covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<'a, T> {
    pub pos_x: usize,
    pub pos_y: usize,
    pub end_x: usize,
    pub end_y: usize,
    /// Index of `edits[0]` in the stream the hunk was cut from.
    pub first_edit: usize,
    pub edits: &'a [Edit<T>],
}

impl<T> Hunk<'_, T> {
    /// Source elements covered.
    pub fn len_x(&self) -> usize {
        self.end_x - self.pos_x
    }

    /// Target elements covered.
    pub fn len_y(&self) -> usize {
        self.end_y - self.pos_y
    }

    pub fn counts(&self) -> EditCounts {
        EditCounts::of(self.edits)
    }
}

/// Running source/target positions while scanning an edit stream.
#[derive(Clone, Copy, Default)]
struct Cursor {
    index: usize,
    x: usize,
    y: usize,
}

impl Cursor {
    fn advance_to<T>(&mut self, edits: &[Edit<T>], index: usize) {
        for e in &edits[self.index..index] {
            self.x += usize::from(e.advances_source());
            self.y += usize::from(e.advances_target());
        }
        self.index = index;
    }
}

/// Cut `edits[lo..hi]` into a hunk, moving `cursor` to `hi`.
fn cut<'a, T>(edits: &'a [Edit<T>], cursor: &mut Cursor, lo: usize, hi: usize) -> Hunk<'a, T> {
    cursor.advance_to(edits, lo);
    let (pos_x, pos_y) = (cursor.x, cursor.y);
    cursor.advance_to(edits, hi);
    Hunk {
        pos_x,
        pos_y,
        end_x: cursor.x,
        end_y: cursor.y,
        first_edit: lo,
        edits: &edits[lo..hi],
    }
}

/// Pad the change span `first..=last` with up to `context` edits per side.
fn padded(first: usize, last: usize, context: usize, len: usize) -> (usize, usize) {
    (
        first.saturating_sub(context),
        last.saturating_add(1).saturating_add(context).min(len),
    )
}

/// Assemble the single hunk spanning every change in `edits`.
///
/// The span from the first to the last change is widened by up to `context`
/// matches on each side. A stream without changes yields no hunk.
///
/// ```
/// use oxidiff::hunk::assemble_hunks;
/// use oxidiff::script::Edit;
///
/// let edits = [Edit::Insert('a'), Edit::Insert('b')];
/// let hunks = assemble_hunks(&edits, 3);
/// assert_eq!(hunks.len(), 1);
/// assert_eq!((hunks[0].pos_x, hunks[0].pos_y, hunks[0].end_x, hunks[0].end_y), (0, 0, 0, 2));
/// ```
pub fn assemble_hunks<T>(edits: &[Edit<T>], context: usize) -> Vec<Hunk<'_, T>> {
    let Some(first) = edits.iter().position(Edit::is_change) else {
        return Vec::new();
    };
    let last = edits.iter().rposition(Edit::is_change).unwrap_or(first);

    let (lo, hi) = padded(first, last, context, edits.len());
    vec![cut(edits, &mut Cursor::default(), lo, hi)]
}

/// Split `edits` into hunks by locality.
///
/// Changes separated by more than `2 * context` matches land in separate
/// hunks; closer changes share one, so the padded hunks never overlap.
pub fn group_hunks<T>(edits: &[Edit<T>], context: usize) -> Vec<Hunk<'_, T>> {
    let mut hunks = Vec::new();
    let mut cursor = Cursor::default();
    let mut cluster: Option<(usize, usize)> = None;

    for (i, _) in edits.iter().enumerate().filter(|(_, e)| e.is_change()) {
        cluster = match cluster {
            Some((first, last)) if i - last - 1 > context.saturating_mul(2) => {
                let (lo, hi) = padded(first, last, context, edits.len());
                hunks.push(cut(edits, &mut cursor, lo, hi));
                Some((i, i))
            }
            Some((first, _)) => Some((first, i)),
            None => Some((i, i)),
        };
    }

    if let Some((first, last)) = cluster {
        let (lo, hi) = padded(first, last, context, edits.len());
        hunks.push(cut(edits, &mut cursor, lo, hi));
    }

    log::debug!(
        "hunks: {} edits grouped into {} hunks (context {context})",
        edits.len(),
        hunks.len()
    );
    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use Edit::{Delete, Insert, Match};

    fn bounds<T>(h: &Hunk<'_, T>) -> (usize, usize, usize, usize) {
        (h.pos_x, h.pos_y, h.end_x, h.end_y)
    }

    #[test]
    fn unchanged_stream_has_no_hunks() {
        let edits = [Match(1), Match(2)];
        assert!(assemble_hunks(&edits, 3).is_empty());
        assert!(group_hunks(&edits, 3).is_empty());
        assert!(assemble_hunks::<u8>(&[], 3).is_empty());
    }

    #[test]
    fn pure_deletion_spans_stream() {
        let edits = [Delete('a'), Delete('b')];
        let hunks = assemble_hunks(&edits, 3);
        assert_eq!(hunks.len(), 1);
        assert_eq!(bounds(&hunks[0]), (0, 0, 2, 0));
        assert_eq!(hunks[0].edits, &edits[..]);
    }

    #[test]
    fn context_is_clamped_to_available_matches() {
        let edits = [
            Match(0),
            Match(1),
            Match(2),
            Match(3),
            Delete(4),
            Insert(40),
            Match(5),
        ];
        let hunks = assemble_hunks(&edits, 2);
        assert_eq!(hunks.len(), 1);
        let h = &hunks[0];
        assert_eq!(h.first_edit, 2);
        assert_eq!(h.edits, &edits[2..7]);
        assert_eq!(bounds(h), (2, 2, 6, 6));
        assert_eq!(h.len_x(), 4);
        assert_eq!(h.len_y(), 4);
    }

    #[test]
    fn zero_context_keeps_only_changes() {
        let edits = [Match(1), Insert(2), Match(3)];
        let hunks = assemble_hunks(&edits, 0);
        assert_eq!(hunks[0].edits, &[Insert(2)][..]);
        assert_eq!(bounds(&hunks[0]), (1, 1, 1, 2));
    }

    #[test]
    fn assemble_keeps_distant_changes_together() {
        let mut edits = vec![Delete(0)];
        edits.extend((1..20).map(Match));
        edits.push(Insert(99));
        let hunks = assemble_hunks(&edits, 1);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].edits.len(), edits.len());
    }

    #[test]
    fn group_splits_distant_changes() {
        let mut edits = vec![Delete(0)];
        edits.extend((1..20).map(Match));
        edits.push(Insert(99));
        let hunks = group_hunks(&edits, 2);
        assert_eq!(hunks.len(), 2);

        assert_eq!(hunks[0].edits, &edits[0..3]);
        assert_eq!(bounds(&hunks[0]), (0, 0, 3, 2));

        assert_eq!(hunks[1].first_edit, 18);
        assert_eq!(hunks[1].edits, &edits[18..21]);
        assert_eq!(bounds(&hunks[1]), (18, 17, 20, 20));
    }

    #[test]
    fn group_merges_when_gap_fits_context() {
        let edits = [
            Delete(0),
            Match(1),
            Match(2),
            Match(3),
            Match(4),
            Insert(5),
        ];
        assert_eq!(group_hunks(&edits, 2).len(), 1);
        assert_eq!(group_hunks(&edits, 1).len(), 2);
        assert_eq!(group_hunks(&edits, 2), assemble_hunks(&edits, 2));
    }

    #[test]
    fn hunk_counts() {
        let edits = [Match(1), Delete(2), Insert(3), Insert(4), Match(5)];
        let c = assemble_hunks(&edits, 1)[0].counts();
        assert_eq!((c.matches, c.deletions, c.insertions), (2, 1, 2));
    }
}
