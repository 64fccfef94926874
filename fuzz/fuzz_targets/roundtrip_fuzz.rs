#![no_main]
use libfuzzer_sys::fuzz_target;
use oxidiff::engine::{DiffOptions, diff_bytes_at};
use oxidiff::hunk::group_hunks;
use oxidiff::script::{EditCounts, new_side, old_side};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the split point and the source offset.
    let flags = data[0] as usize;
    let payload = &data[1..];
    let split = flags % (payload.len() + 1);
    let (source, target) = payload.split_at(split);
    let offset = (flags >> 4).min(source.len());

    let d = diff_bytes_at(source, target, offset, &DiffOptions::default()).unwrap();
    assert_eq!(old_side(&d.edits), &source[offset..]);
    assert_eq!(new_side(&d.edits), target);
    assert_eq!(d.vectors.source.len(), source.len() + 1);
    assert_eq!(d.vectors.target.len(), target.len() + 1);

    let counts = EditCounts::of(&d.edits);
    assert_eq!(counts.changes(), d.vectors.distance());

    let covered: usize = group_hunks(&d.edits, 3)
        .iter()
        .map(|h| h.counts().changes())
        .sum();
    assert_eq!(covered, counts.changes());
});
