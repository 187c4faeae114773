mod common;

use common::{indexes, mem_set};
use renum::{FileSet, FileSetError, GapPolicy, Pattern, Selection, Spot};

#[test]
fn inserts_between_and_shifts_the_tail() {
    let (mem, mut dest) = mem_set("p", &["p0.jpg", "p1.jpg", "p2.jpg", "p3.jpg", "q0.jpg", "q1.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    let consumed = dest
        .add_file_set(&mut source, Spot::after(1), Selection::All, GapPolicy::Fail)
        .unwrap();

    assert_eq!(consumed, 2);
    assert_eq!(indexes(&dest), vec![0, 1, 2, 3, 4, 5]);
    assert!(source.is_empty());
    // Former p2/p3 moved out of the window, former q0/q1 landed in it.
    assert!(mem.contains("p4.jpg"));
    assert!(mem.contains("p5.jpg"));
    assert!(!mem.contains("q0.jpg"));
}

#[test]
fn appending_after_the_end_shifts_nothing() {
    let (mem, mut dest) = mem_set("p", &["p0.jpg", "q0.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    dest.add_file_set(
        &mut source,
        Spot::after(dest.max_index()),
        Selection::All,
        GapPolicy::Fail,
    )
    .unwrap();

    assert_eq!(indexes(&dest), vec![0, 1]);
    assert_eq!(mem.rename_count(), 1);
}

#[test]
fn selection_order_is_followed_not_sorted() {
    let (mem, mut dest) = mem_set("p", &["q0.jpg", "q1.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    dest.add_file_set(
        &mut source,
        Spot::after(-1),
        Selection::Indexes(vec![1, 0]),
        GapPolicy::Fail,
    )
    .unwrap();

    // q1 took index 0, q0 took index 1.
    assert_eq!(
        mem.renames(),
        vec![
            ("q1.jpg".to_string(), "p0.jpg".to_string()),
            ("q0.jpg".to_string(), "p1.jpg".to_string()),
        ]
    );
}

#[test]
fn source_gap_fails_without_a_policy() {
    let (mem, mut dest) = mem_set("p", &["p0.jpg", "q0.jpg", "q2.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    let err = dest
        .add_file_set(
            &mut source,
            Spot::after(0),
            Selection::Indexes(vec![0, 1, 2]),
            GapPolicy::Fail,
        )
        .unwrap_err();

    assert!(matches!(err, FileSetError::IndexUnassigned { index: 1 }));
    assert_eq!(indexes(&dest), vec![0]);
    assert_eq!(indexes(&source), vec![0, 2]);
    assert_eq!(mem.rename_count(), 0);
}

#[test]
fn strip_drops_source_gaps() {
    let (mem, mut dest) = mem_set("p", &["q0.jpg", "q2.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    let consumed = dest
        .add_file_set(
            &mut source,
            Spot::after(-1),
            Selection::Indexes(vec![0, 1, 2]),
            GapPolicy::Strip,
        )
        .unwrap();

    assert_eq!(consumed, 2);
    assert_eq!(indexes(&dest), vec![0, 1]);
}

#[test]
fn preserve_turns_source_gaps_into_destination_gaps() {
    let (mem, mut dest) = mem_set("p", &["q0.jpg", "q2.jpg"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    let consumed = dest
        .add_file_set(
            &mut source,
            Spot::after(-1),
            Selection::Indexes(vec![0, 1, 2]),
            GapPolicy::Preserve,
        )
        .unwrap();

    assert_eq!(consumed, 3);
    assert_eq!(indexes(&dest), vec![0, 2]);
    assert_eq!(dest.max_index(), 2);
}

#[test]
fn multi_assigned_indexes_move_together() {
    let (mem, mut dest) = mem_set("p", &["q0.jpg", "q0.png"]);
    let mut source = FileSet::detect(Pattern::new("q", ""), mem.clone()).unwrap();

    dest.add_file_set(&mut source, Spot::after(-1), Selection::All, GapPolicy::Fail)
        .unwrap();

    assert_eq!(dest.files()[&0].len(), 2);
    assert!(mem.contains("p0.jpg"));
    assert!(mem.contains("p0.png"));
}
