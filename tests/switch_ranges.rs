mod common;

use common::{indexes, mem_set};
use renum::{FileSetError, GapPolicy, IndexRange};

#[test]
fn overlapping_ranges_are_rejected() {
    let (mem, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p2.jpg"]);
    let err = set
        .switch_file_ranges(
            IndexRange::new(0, 1).unwrap(),
            IndexRange::new(1, 2).unwrap(),
            GapPolicy::Fail,
        )
        .unwrap_err();
    assert!(matches!(err, FileSetError::OverlappingRanges { .. }));
    assert_eq!(mem.rename_count(), 0);
}

#[test]
fn equal_ranges_swap_and_leave_the_rest_untouched() {
    let (mem, mut set) = mem_set(
        "p",
        &["p0.jpg", "p1.jpg", "p2.jpg", "p3.jpg", "p4.jpg", "p5.jpg"],
    );

    set.switch_file_ranges(
        IndexRange::new(0, 1).unwrap(),
        IndexRange::new(3, 4).unwrap(),
        GapPolicy::Fail,
    )
    .unwrap();

    assert_eq!(indexes(&set), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(set.max_index(), 5);
    // Indexes outside both ranges never get renamed.
    for (from, to) in mem.renames() {
        assert_ne!(from, "p2.jpg");
        assert_ne!(from, "p5.jpg");
        assert_ne!(to, "p2.jpg");
        assert_ne!(to, "p5.jpg");
    }
}

#[test]
fn unequal_ranges_shift_the_block_between_them() {
    let (_, mut set) = mem_set(
        "p",
        &["p0.jpg", "p1.jpg", "p2.jpg", "p3.jpg", "p4.jpg", "p5.jpg"],
    );

    set.switch_file_ranges(
        IndexRange::new(0, 2).unwrap(),
        IndexRange::new(5, 5).unwrap(),
        GapPolicy::Fail,
    )
    .unwrap();

    // Former order 0,1,2,3,4,5 becomes 5,3,4,0,1,2.
    assert_eq!(indexes(&set), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(set.max_index(), 5);
}

#[test]
fn switch_files_swaps_two_single_indexes() {
    let (mem, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p2.jpg"]);
    set.switch_files(0, 2, false).unwrap();

    assert_eq!(indexes(&set), vec![0, 1, 2]);
    // p0 ended up at index 2 directly; p2 took index 0 via staging.
    let renames = mem.renames();
    assert!(renames.contains(&("p0.jpg".to_string(), "p2.jpg".to_string())));
    assert_eq!(renames.last().map(|(_, to)| to.as_str()), Some("p0.jpg"));
}

#[test]
fn unassigned_index_fails_without_a_policy() {
    let (_, mut set) = mem_set("p", &["p0.jpg", "p3.jpg"]);
    let err = set.switch_files(0, 2, false).unwrap_err();
    assert!(matches!(err, FileSetError::IndexUnassigned { index: 2 }));
}

#[test]
fn preserve_keeps_placeholder_slots_across_the_switch() {
    let (_, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p3.jpg"]);

    set.switch_file_ranges(
        IndexRange::new(0, 1).unwrap(),
        IndexRange::new(3, 4).unwrap(),
        GapPolicy::Preserve,
    )
    .unwrap();

    // The pair (3, gap) took the front; the gap survives at index 1.
    assert_eq!(indexes(&set), vec![0, 3, 4]);
    assert_eq!(set.max_index(), 4);
}

#[test]
fn strip_shrinking_an_adjacent_right_range_still_completes() {
    // Stripping (2,4) down to one file makes the staged block narrower than
    // (0,1); with no block between them the swap must still land cleanly.
    let (mem, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p2.jpg"]);

    set.switch_file_ranges(
        IndexRange::new(0, 1).unwrap(),
        IndexRange::new(2, 4).unwrap(),
        GapPolicy::Strip,
    )
    .unwrap();

    // Former order 0,1,2 becomes 2,0,1; nothing stays parked under a
    // staging name.
    assert_eq!(indexes(&set), vec![0, 1, 2]);
    assert_eq!(set.max_index(), 2);
    let names = mem.names();
    assert_eq!(names, vec!["p0.jpg", "p1.jpg", "p2.jpg"]);
    // Former p2 took the front via staging.
    let renames = mem.renames();
    let staged_as = renames
        .iter()
        .find(|(from, _)| from == "p2.jpg")
        .map(|(_, to)| to.clone())
        .unwrap();
    assert!(renames.contains(&(staged_as, "p0.jpg".to_string())));
}

#[test]
fn max_index_stays_exact_after_a_switch() {
    let (_, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p2.jpg", "p3.jpg"]);

    set.switch_file_ranges(
        IndexRange::new(0, 0).unwrap(),
        IndexRange::new(2, 3).unwrap(),
        GapPolicy::Fail,
    )
    .unwrap();

    assert_eq!(set.max_index(), 3);
    assert_eq!(indexes(&set), vec![0, 1, 2, 3]);
}
