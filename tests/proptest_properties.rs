use oxidiff::engine::{DiffOptions, diff, diff_bytes_at};
use oxidiff::hunk::{assemble_hunks, group_hunks};
use oxidiff::script::{Edit, EditCounts, new_side, old_side};
use oxidiff::{align, build_edit_script};
use proptest::prelude::*;

/// Longest common subsequence length by the quadratic DP.
fn lcs_len(x: &[u8], y: &[u8]) -> usize {
    let mut row = vec![0usize; y.len() + 1];
    for &a in x {
        let mut diag = 0;
        for (j, &b) in y.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if a == b {
                diag + 1
            } else {
                up.max(row[j])
            };
            diag = up;
        }
    }
    row[y.len()]
}

/// Small alphabet so random inputs share plenty of elements.
fn small_alphabet(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 0..max_len)
}

proptest! {
    #[test]
    fn prop_script_replays_both_inputs(
        x in small_alphabet(200),
        y in small_alphabet(200),
    ) {
        let d = diff(&x, &y, &DiffOptions::default()).unwrap();
        prop_assert_eq!(old_side(&d.edits), x);
        prop_assert_eq!(new_side(&d.edits), y);
    }

    #[test]
    fn prop_distance_is_minimal(
        x in small_alphabet(120),
        y in small_alphabet(120),
    ) {
        let rv = align(&x, &y);
        let lcs = lcs_len(&x, &y);
        prop_assert_eq!(rv.deletions(), x.len() - lcs);
        prop_assert_eq!(rv.insertions(), y.len() - lcs);
    }

    #[test]
    fn prop_sentinel_slots_stay_clear(
        x in small_alphabet(64),
        y in small_alphabet(64),
    ) {
        let rv = align(&x, &y);
        prop_assert_eq!(rv.source.len(), x.len() + 1);
        prop_assert_eq!(rv.target.len(), y.len() + 1);
        prop_assert!(!rv.source[x.len()]);
        prop_assert!(!rv.target[y.len()]);
    }

    #[test]
    fn prop_identical_inputs_mark_nothing(x in proptest::collection::vec(any::<u8>(), 0..512)) {
        let rv = align(&x, &x);
        prop_assert!(rv.is_unchanged());
        let edits = build_edit_script(&x, &x, &rv.source, &rv.target);
        prop_assert!(edits.iter().all(|e| matches!(e, Edit::Match(_))));
        prop_assert!(assemble_hunks(&edits, 3).is_empty());
    }

    #[test]
    fn prop_empty_side_is_all_one_kind(y in proptest::collection::vec(any::<u8>(), 1..256)) {
        let empty: &[u8] = &[];
        let insert = diff(empty, &y, &DiffOptions::default()).unwrap();
        prop_assert!(insert.edits.iter().all(|e| matches!(e, Edit::Insert(_))));
        let delete = diff(&y, empty, &DiffOptions::default()).unwrap();
        prop_assert!(delete.edits.iter().all(|e| matches!(e, Edit::Delete(_))));

        let hunks = assemble_hunks(&insert.edits, 3);
        prop_assert_eq!(hunks.len(), 1);
        prop_assert_eq!((hunks[0].pos_x, hunks[0].pos_y), (0, 0));
        prop_assert_eq!((hunks[0].end_x, hunks[0].end_y), (0, y.len()));
    }

    #[test]
    fn prop_replacements_delete_before_insert(
        x in small_alphabet(150),
        y in small_alphabet(150),
    ) {
        let d = diff(&x, &y, &DiffOptions::default()).unwrap();
        for pair in d.edits.windows(2) {
            prop_assert!(
                !matches!(pair, [Edit::Insert(_), Edit::Delete(_)]),
                "insert directly followed by delete"
            );
        }
    }

    #[test]
    fn prop_hunks_cover_every_change(
        x in small_alphabet(200),
        y in small_alphabet(200),
        context in 0usize..6,
    ) {
        let d = diff(&x, &y, &DiffOptions::default()).unwrap();
        let hunks = group_hunks(&d.edits, context);

        let mut covered = 0;
        let mut prev_end = 0;
        for h in &hunks {
            prop_assert!(h.first_edit >= prev_end, "hunks overlap");
            prev_end = h.first_edit + h.edits.len();

            prop_assert_eq!(&d.edits[h.first_edit..prev_end], h.edits);
            prop_assert!(h.edits.iter().any(Edit::is_change));

            let counts = h.counts();
            prop_assert_eq!(h.len_x(), counts.source_len());
            prop_assert_eq!(h.len_y(), counts.target_len());
            covered += counts.changes();
        }
        prop_assert_eq!(covered, EditCounts::of(&d.edits).changes());

        if let [only] = assemble_hunks(&d.edits, context).as_slice() {
            if let (Some(first), Some(last)) = (hunks.first(), hunks.last()) {
                prop_assert_eq!(only.first_edit, first.first_edit);
                prop_assert_eq!(only.end_x, last.end_x);
                prop_assert_eq!(only.end_y, last.end_y);
            }
        } else {
            prop_assert!(hunks.is_empty());
        }
    }

    #[test]
    fn prop_offset_diff_matches_window_diff(
        prefix in proptest::collection::vec(any::<u8>(), 0..32),
        x in small_alphabet(100),
        y in small_alphabet(100),
    ) {
        let mut source = prefix.clone();
        source.extend_from_slice(&x);
        let opts = DiffOptions::default();

        let at = diff_bytes_at(&source, &y, prefix.len(), &opts).unwrap();
        let plain = diff(&x, &y, &opts).unwrap();

        prop_assert_eq!(&at.edits, &plain.edits);
        prop_assert!(at.vectors.source[..prefix.len()].iter().all(|&m| !m));
        prop_assert_eq!(&at.vectors.source[prefix.len()..], plain.vectors.source.as_slice());
    }
}

#[test]
#[ignore = "performance properties are workload and machine dependent"]
fn perf_property_scattered_edits_not_pathological() {
    use std::time::Instant;
    let source: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
    let mut target = source.clone();
    for i in (0..target.len()).step_by(4096) {
        target[i] = target[i].wrapping_add(3);
    }

    let t0 = Instant::now();
    let rv = align(&source, &target);
    let dt = t0.elapsed();
    assert!(rv.distance() <= 2 * target.len().div_ceil(4096));
    assert!(dt.as_secs_f64() < 5.0, "alignment took too long: {dt:?}");
}
