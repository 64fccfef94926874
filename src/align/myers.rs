// Linear-space Myers O(ND) engine.
//
// `compare` strips the common prefix/suffix of a rectangle of the edit graph,
// handles the degenerate rectangles directly, and otherwise asks `split` for a
// snake on an optimal path through the middle. Both halves either side of
// that snake are then compared independently.
//
// Coordinates are local sequence positions: `s` walks the source (X), `t`
// walks the target (Y), and a diagonal is `k = s - t`. Diagonal numbers are
// absolute across the whole problem, so the two frontier arrays can be shared
// by every recursive call without being cleared.

use std::ops::{Index, IndexMut};

/// Sentinel written just outside a forward frontier: never further than a real point.
const FORWARD_FLOOR: isize = -1;
/// Sentinel written just outside a backward frontier: never further than a real point.
const BACKWARD_CEILING: isize = isize::MAX;

/// Furthest-reaching source position per diagonal.
///
/// Diagonals can be negative, so the backing vector is addressed through a
/// fixed offset. One `V` is sized for the whole top-level problem and reused
/// across every sub-rectangle.
pub(crate) struct V {
    offset: isize,
    v: Vec<isize>,
}

impl V {
    /// Arena for sequences of `n` and `m` elements: `2 * (n + m) + 3` slots.
    pub(crate) fn for_lengths(n: usize, m: usize) -> Self {
        let span = n + m;
        Self {
            offset: span as isize + 1,
            v: vec![0; 2 * span + 3],
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.v.len()
    }
}

impl Index<isize> for V {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// A run of diagonal moves from `(s0, t0)` to `(s1, t1)`. May be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snake {
    pub s0: usize,
    pub t0: usize,
    pub s1: usize,
    pub t1: usize,
}

impl std::fmt::Display for Snake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) -> ({}, {})", self.s0, self.t0, self.s1, self.t1)
    }
}

/// One alignment in progress: inputs, predicate, frontier arena and the
/// result vectors being marked.
pub(crate) struct Myers<'a, 'r, T, F> {
    x: &'a [T],
    y: &'a [T],
    eq: F,
    xidx: Option<&'a [usize]>,
    yidx: Option<&'a [usize]>,
    vf: V,
    vb: V,
    marks_x: &'r mut [bool],
    marks_y: &'r mut [bool],
}

impl<'a, 'r, T, F> Myers<'a, 'r, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    /// Index maps must already be validated against the sequences and the
    /// mark slices.
    pub(crate) fn new(
        x: &'a [T],
        y: &'a [T],
        eq: F,
        xidx: Option<&'a [usize]>,
        yidx: Option<&'a [usize]>,
        marks_x: &'r mut [bool],
        marks_y: &'r mut [bool],
    ) -> Self {
        Self {
            x,
            y,
            eq,
            xidx,
            yidx,
            vf: V::for_lengths(x.len(), y.len()),
            vb: V::for_lengths(x.len(), y.len()),
            marks_x,
            marks_y,
        }
    }

    /// Align the full sequences.
    pub(crate) fn run(&mut self) {
        let (n, m) = (self.x.len(), self.y.len());
        let (smin, smax, tmin, tmax) = self.strip(0, n, 0, m);
        log::debug!(
            "align: source {n}, target {m}, common prefix {smin}, common suffix {}",
            n - smax
        );
        self.compare(smin, smax, tmin, tmax);
    }

    #[inline]
    fn equal(&mut self, s: usize, t: usize) -> bool {
        (self.eq)(&self.x[s], &self.y[t])
    }

    fn mark_source(&mut self, s: usize) {
        let at = self.xidx.map_or(s, |map| map[s]);
        self.marks_x[at] = true;
    }

    fn mark_target(&mut self, t: usize) {
        let at = self.yidx.map_or(t, |map| map[t]);
        self.marks_y[at] = true;
    }

    /// Shrink a rectangle past its common prefix and common suffix.
    fn strip(
        &mut self,
        mut smin: usize,
        mut smax: usize,
        mut tmin: usize,
        mut tmax: usize,
    ) -> (usize, usize, usize, usize) {
        while smin < smax && tmin < tmax && self.equal(smin, tmin) {
            smin += 1;
            tmin += 1;
        }
        while smin < smax && tmin < tmax && self.equal(smax - 1, tmax - 1) {
            smax -= 1;
            tmax -= 1;
        }
        (smin, smax, tmin, tmax)
    }

    pub(crate) fn compare(&mut self, smin: usize, smax: usize, tmin: usize, tmax: usize) {
        let (smin, smax, tmin, tmax) = self.strip(smin, smax, tmin, tmax);

        if smin == smax {
            for t in tmin..tmax {
                self.mark_target(t);
            }
        } else if tmin == tmax {
            for s in smin..smax {
                self.mark_source(s);
            }
        } else {
            let snake = self.split(smin, smax, tmin, tmax);
            self.compare(smin, snake.s0, tmin, snake.t0);
            self.compare(snake.s1, smax, snake.t1, tmax);
        }
    }

    /// Find a snake on an optimal path through `[smin,smax) x [tmin,tmax)`.
    ///
    /// Runs the greedy search forward from `(smin, tmin)` and backward from
    /// `(smax, tmax)`, one round each per edit cost, until the frontiers meet
    /// on a shared diagonal. An optimal path has the parity of `N - M`, so
    /// overlaps are only checked after forward rounds when that difference is
    /// odd and after backward rounds when it is even.
    ///
    /// Both ranges must be non-empty with differing first and last elements.
    pub(crate) fn split(&mut self, smin: usize, smax: usize, tmin: usize, tmax: usize) -> Snake {
        let (smin, smax, tmin, tmax) = (smin as isize, smax as isize, tmin as isize, tmax as isize);

        let dmin = smin - tmax;
        let dmax = smax - tmin;
        let fmid = smin - tmin;
        let bmid = smax - tmax;
        let odd = (fmid - bmid) & 1 != 0;

        let (mut fmin, mut fmax) = (fmid, fmid);
        let (mut bmin, mut bmax) = (bmid, bmid);
        self.vf[fmid] = smin;
        self.vb[bmid] = smax;

        let mut cost = 0usize;
        loop {
            cost += 1;

            // Forward round. Frontier grows by one diagonal per side unless
            // it would leave the rectangle, in which case it shrinks to keep
            // parity.
            if fmin > dmin {
                fmin -= 1;
                self.vf[fmin - 1] = FORWARD_FLOOR;
            } else {
                fmin += 1;
            }
            if fmax < dmax {
                fmax += 1;
                self.vf[fmax + 1] = FORWARD_FLOOR;
            } else {
                fmax -= 1;
            }

            let mut k = fmax;
            while k >= fmin {
                // Equal reach prefers diagonal k-1: a deletion.
                let start = if self.vf[k - 1] >= self.vf[k + 1] {
                    self.vf[k - 1] + 1
                } else {
                    self.vf[k + 1]
                };
                let (mut s, mut t) = (start, start - k);
                while s < smax && t < tmax && self.equal(s as usize, t as usize) {
                    s += 1;
                    t += 1;
                }
                self.vf[k] = s;

                if odd && bmin <= k && k <= bmax && self.vb[k] <= s {
                    let snake = Snake {
                        s0: start as usize,
                        t0: (start - k) as usize,
                        s1: s as usize,
                        t1: t as usize,
                    };
                    log::trace!("split: cost {} (forward), snake {snake}", 2 * cost - 1);
                    return snake;
                }
                k -= 2;
            }

            // Backward round, mirrored.
            if bmin > dmin {
                bmin -= 1;
                self.vb[bmin - 1] = BACKWARD_CEILING;
            } else {
                bmin += 1;
            }
            if bmax < dmax {
                bmax += 1;
                self.vb[bmax + 1] = BACKWARD_CEILING;
            } else {
                bmax -= 1;
            }

            let mut k = bmax;
            while k >= bmin {
                // Equal reach prefers diagonal k+1: a deletion.
                let end = if self.vb[k - 1] < self.vb[k + 1] {
                    self.vb[k - 1]
                } else {
                    self.vb[k + 1] - 1
                };
                let (mut s, mut t) = (end, end - k);
                while s > smin && t > tmin && self.equal((s - 1) as usize, (t - 1) as usize) {
                    s -= 1;
                    t -= 1;
                }
                self.vb[k] = s;

                if !odd && fmin <= k && k <= fmax && s <= self.vf[k] {
                    let snake = Snake {
                        s0: s as usize,
                        t0: t as usize,
                        s1: end as usize,
                        t1: (end - k) as usize,
                    };
                    log::trace!("split: cost {} (backward), snake {snake}", 2 * cost);
                    return snake;
                }
                k -= 2;
            }
        }
    }
}
